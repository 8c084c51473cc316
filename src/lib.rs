//! # ripe-atlas - RIPE Atlas API client
//!
//! A small client library for the RIPE Atlas measurement platform REST API.
//!
//! ## Features
//! - Async, tokio compatible
//! - API key authentication through the `key` query parameter
//! - Transparent pagination of list endpoints
//! - One error type for transport, API and decoding failures
//! - Pluggable transport, `reqwest` by default
//!
//! ## Architecture
//!
//! - **`Config`**: API key, verbosity, log sink, endpoint and proxy. Several
//!   can be given to `Client::new`, the last one wins.
//! - **`Client`**: owns the merged config, the transport and a set of options
//!   added to every request.
//! - **`Transport`**: performs GET requests and returns the full body.
//!
//! Responses with a status under 500 are accepted as they are; from 500 up
//! the body is decoded as the API error envelope.
//!
//! ## Example
//! ```no_run
//! use ripe_atlas::{Client, Config, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::new(vec![Config::default().with_api_key("your-api-key")])?;
//!     client.set_option("status", "2");
//!
//!     let mut params = Params::new();
//!     params.insert("country_code".to_string(), "fr".to_string());
//!     params.insert("type".to_string(), "sslcert".to_string());
//!
//!     for m in client.measurements(&params).await? {
//!         println!("{} {}", m.id, m.kind);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod http;
pub mod model;
pub mod options;
pub mod page;
pub mod query;

// Re-exports for convenience
pub use client::{ApiError, Client, ClientError};
pub use http::{RawResponse, Transport};
pub use model::{Measurement, Probe, SslCertResult};
pub use options::{Config, SecretString};
pub use page::Page;
pub use query::{add_query_parameters, get_page_num, Params};

const OUR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of this library, as sent in the `User-Agent` header.
pub fn version() -> &'static str {
    OUR_VERSION
}

//! HTTP transport used by the client.
//!
//! `Transport` is the seam between the client and the network: the client
//! only ever sees a `RawResponse` (status and full body). `HttpTransport` is
//! the `reqwest` implementation used by `Client::new`.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HOST, USER_AGENT};
use std::time::Duration;

use crate::client::ClientError;
use crate::options::{Config, API_ENDPOINT};

/// Per-call timeout.
pub const TIMEOUT: Duration = Duration::from_secs(20);

/// A fully read HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes GET requests for the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and read the whole body.
    async fn get(&self, url: &str) -> Result<RawResponse, ClientError>;
}

/// Build a configured HTTP client from the client config.
///
/// This applies the fixed timeout and the proxy, if any. A proxy URL that
/// `reqwest` rejects is an error, not silently dropped.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().timeout(TIMEOUT);

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(ClientError::Setup)?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(ClientError::Setup)
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    host: String,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(config)?,
            host: canonical_host(),
            user_agent: format!("ripe-atlas/{}", crate::version()),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .get(url)
            .header(HOST, &self.host)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}

/// Host part of `API_ENDPOINT`, sent on every request.
fn canonical_host() -> String {
    url::Url::parse(API_ENDPOINT)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

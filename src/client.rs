//! The API client handle and its error types.

use itertools::Itertools;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::http::{HttpTransport, RawResponse, Transport};
use crate::options::{self, Config};
use crate::query::{add_query_parameters, Params};

/// Status codes from this value up are failures. Anything below, including
/// non-2xx codes, is accepted as the platform uses them loosely.
pub const ERROR_THRESHOLD: u16 = 500;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport setup failed: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no response received")]
    NoResponse,

    #[error("API error: {0}")]
    Api(ApiError),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pagination loop: page {0} was already fetched")]
    RepeatedPage(String),
}

/// An error reported by the API through its error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response
    pub http_status: u16,

    /// Status as reported inside the envelope
    pub status: Option<u16>,

    /// Application error code
    pub code: Option<u32>,

    pub title: Option<String>,

    pub detail: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.http_status)?;
        if let Some(code) = self.code {
            write!(f, " (code {})", code)?;
        }
        write!(f, ": {}", self.detail)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: String,
}

/// RIPE Atlas API client.
///
/// Built once from one or more `Config` values and reused for every call.
/// Options set with `set_option` are added to the query of every later call.
///
/// # Example
/// ```no_run
/// use ripe_atlas::{Client, Config, Params};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new(vec![Config::default().with_api_key("my-key")])?;
///
///     let mut params = Params::new();
///     params.insert("country_code".to_string(), "fr".to_string());
///
///     let measurements = client.measurements(&params).await?;
///     println!("{} measurements", measurements.len());
///     Ok(())
/// }
/// ```
pub struct Client {
    config: Config,
    opts: Params,
    transport: Box<dyn Transport>,
    level: u8,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("opts", &self.opts)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client talking to the configured endpoint over HTTP.
    ///
    /// When several configs are given the last one wins. Fails only if the
    /// HTTP transport cannot be built.
    pub fn new<I>(configs: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = Config>,
    {
        let config = options::merge(configs);
        let transport = HttpTransport::new(&config)?;
        Ok(Self::from_parts(config, Box::new(transport)))
    }

    /// Create a client on top of a caller supplied transport.
    pub fn with_transport<I, T>(configs: I, transport: T) -> Self
    where
        I: IntoIterator<Item = Config>,
        T: Transport + 'static,
    {
        Self::from_parts(options::merge(configs), Box::new(transport))
    }

    fn from_parts(config: Config, transport: Box<dyn Transport>) -> Self {
        let client = Self {
            level: config.level,
            config,
            opts: Params::new(),
            transport,
        };
        client.verbose(format_args!("config={:?}", client.config));
        client
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Verbosity level in use.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set an option sent with every subsequent call. Empty values are
    /// ignored.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.opts.insert(name.into(), value);
        }
        self
    }

    /// Options set so far.
    pub fn options(&self) -> &Params {
        &self.opts
    }

    /// The API key, if one is configured.
    pub fn has_api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
    }

    /// Copy of `params` with the API key added as `key`.
    pub fn add_api_key(&self, params: &Params) -> Params {
        let mut params = params.clone();
        if let Some(key) = self.has_api_key() {
            params.insert("key".to_string(), key.to_string());
        }
        params
    }

    /// Classify a response.
    ///
    /// No response at all is an error. Codes under `ERROR_THRESHOLD` are
    /// success. From there the body is decoded as an error envelope: an
    /// `Api` error when it decodes, `Parse` otherwise.
    pub fn handle_api_response(&self, response: Option<&RawResponse>) -> Result<(), ClientError> {
        let Some(response) = response else {
            return Err(ClientError::NoResponse);
        };

        self.debug(format_args!("status={}", response.status));
        if response.status < ERROR_THRESHOLD {
            return Ok(());
        }

        let envelope: ErrorEnvelope = serde_json::from_slice(&response.body)?;
        Err(ClientError::Api(ApiError {
            http_status: response.status,
            status: envelope.error.status,
            code: envelope.error.code,
            title: envelope.error.title,
            detail: envelope.error.detail,
        }))
    }

    /// Full URL for `path` with the stored options, `params` and the API key.
    pub(crate) fn build_url(&self, path: &str, params: &Params) -> String {
        let mut merged = self.opts.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        let merged = self.add_api_key(&merged);
        add_query_parameters(&format!("{}{}", self.config.endpoint, path), &merged)
    }

    /// Fetch `url` and validate the response.
    pub(crate) async fn call(&self, url: &str) -> Result<RawResponse, ClientError> {
        self.verbose(format_args!("Full URL: {}", redact_key(url)));
        let response = self.transport.get(url).await?;
        self.handle_api_response(Some(&response))?;
        Ok(response)
    }

    /// Fetch `path` and decode the JSON body.
    pub(crate) async fn get_json<T>(&self, path: &str, params: &Params) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.call(&self.build_url(path, params)).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub(crate) fn verbose(&self, args: fmt::Arguments<'_>) {
        if self.level >= 1 {
            self.log(|| info!("{}", args));
        }
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        if self.level >= 2 {
            self.log(|| debug!("{}", args));
        }
    }

    fn log(&self, f: impl FnOnce()) {
        // merge always installs a sink
        if let Some(sink) = &self.config.log {
            tracing::dispatcher::with_default(sink, f);
        }
    }
}

/// `url` with the value of its `key` parameter masked.
fn redact_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("key=") {
                "key=[REDACTED]"
            } else {
                pair
            }
        })
        .join("&");
    format!("{}?{}", base, query)
}

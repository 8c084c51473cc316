//! Client configuration and the merge step run by `Client::new`.

use tracing::Dispatch;

/// Canonical RIPE Atlas API endpoint.
pub const API_ENDPOINT: &str = "https://atlas.ripe.net/api/v2";

/// Highest verbosity level a client will use.
pub const MAX_LEVEL: u8 = 2;

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Client configuration.
///
/// Several of these can be handed to `Client::new`; the last one wins as a
/// whole record, it is not merged field by field.
///
/// # Example
/// ```rust
/// use ripe_atlas::options::Config;
///
/// let config = Config::default()
///     .with_api_key("my-key")
///     .with_level(1);
/// assert_eq!(config.level, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API key sent as the `key` query parameter
    pub api_key: Option<SecretString>,

    /// Shorthand for level 1
    pub verbose: bool,

    /// Verbosity level (0 - 2), overrides `verbose` when non-zero
    pub level: u8,

    /// Log sink; a stderr fmt subscriber is installed when unset
    pub log: Option<Dispatch>,

    /// Base URL for API endpoints, empty means `API_ENDPOINT`
    pub endpoint: String,

    /// HTTP proxy URL; the usual proxy environment variables apply when unset
    pub proxy: Option<String>,
}

impl Config {
    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Turn verbose mode on or off.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the verbosity level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Set the log sink.
    pub fn with_log(mut self, log: Dispatch) -> Self {
        self.log = Some(log);
        self
    }

    /// Set the base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Collapse a sequence of configs into the effective one.
///
/// The returned config always has a log sink, a non-empty endpoint and a
/// level in `0..=MAX_LEVEL`.
pub fn merge<I>(configs: I) -> Config
where
    I: IntoIterator<Item = Config>,
{
    let mut config = configs.into_iter().last().unwrap_or_default();

    if config.log.is_none() {
        config.log = Some(default_sink());
    }

    let mut level = 0;
    if config.verbose {
        level = 1;
    }
    if config.level != 0 {
        level = config.level;
    }
    config.level = level.min(MAX_LEVEL);

    if config.endpoint.is_empty() {
        config.endpoint = API_ENDPOINT.to_string();
    }

    config
}

fn default_sink() -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty() {
        let config = merge(Vec::<Config>::new());
        assert_eq!(config.level, 0);
        assert_eq!(config.endpoint, API_ENDPOINT);
        assert!(config.log.is_some());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_merge_last_wins() {
        let first = Config::default().with_api_key("foo").with_level(2);
        let second = Config::default().with_endpoint("http://localhost:1234");

        let config = merge(vec![first, second]);
        assert!(config.api_key.is_none());
        assert_eq!(config.level, 0);
        assert_eq!(config.endpoint, "http://localhost:1234");
    }

    #[test]
    fn test_merge_verbose() {
        let config = merge(vec![Config::default().with_verbose(true)]);
        assert_eq!(config.level, 1);

        let config = merge(vec![Config::default().with_verbose(true).with_level(2)]);
        assert_eq!(config.level, 2);
    }

    #[test]
    fn test_merge_clamps_level() {
        for level in [0, 1, 2, 3, 42, u8::MAX] {
            let config = merge(vec![Config::default().with_level(level)]);
            assert!(config.level <= MAX_LEVEL);
        }
        let config = merge(vec![Config::default().with_level(5)]);
        assert_eq!(config.level, 2);
    }

    #[test]
    fn test_merge_keeps_log_sink() {
        let sink = Dispatch::new(tracing_subscriber::fmt().finish());
        let config = merge(vec![Config::default().with_log(sink)]);
        assert!(config.log.is_some());
    }

    #[test]
    fn test_secret_string_debug_is_redacted() {
        let config = Config::default().with_api_key("hunter2");
        let dump = format!("{:?}", config);
        assert!(!dump.contains("hunter2"));
        assert!(dump.contains("REDACTED"));
    }
}

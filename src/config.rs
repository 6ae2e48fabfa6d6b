use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

pub const FACTUAL_KEY: &str = "FACTUAL_KEY";
pub const FACTUAL_SECRET: &str = "FACTUAL_SECRET";
pub const FACTUAL_BASE_URL: &str = "FACTUAL_BASE_URL";
pub const FACTUAL_DEBUG: &str = "FACTUAL_DEBUG";

pub const DEFAULT_BASE_URL: &str = "https://api.v3.factual.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Driver configuration.
#[derive(Clone)]
pub struct Config {
    /// OAuth consumer key.
    pub key: String,
    /// OAuth consumer secret.
    pub secret: String,
    /// API root, defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Connection timeout, `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
    /// Log every request and response at info level.
    pub debug: bool,
    /// How many ID-remap redirects a single call may follow.
    pub max_redirects: usize,
}

impl Config {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Config {
            key: key.into(),
            secret: secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            debug: false,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Load from `FACTUAL_KEY`, `FACTUAL_SECRET` and the optional
    /// `FACTUAL_BASE_URL` / `FACTUAL_DEBUG`.
    pub fn from_env() -> Result<Self> {
        let key = env::var(FACTUAL_KEY)
            .map_err(|_| Error::InvalidConfig(format!("{FACTUAL_KEY} is not set")))?;
        let secret = env::var(FACTUAL_SECRET)
            .map_err(|_| Error::InvalidConfig(format!("{FACTUAL_SECRET} is not set")))?;
        let mut config = Config::new(key, secret);
        if let Ok(base_url) = env::var(FACTUAL_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(v) = env::var(FACTUAL_DEBUG) {
            config.debug = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("key", &self.key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .field("max_redirects", &self.max_redirects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let config = Config::new("k", "s");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(config.max_redirects, 5);
        assert!(!config.debug);

        let config = config
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(2))
            .with_debug(true)
            .with_max_redirects(1);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
        assert!(config.debug);
        assert_eq!(config.max_redirects, 1);
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", Config::new("k", "very-secret"));
        assert!(!rendered.contains("very-secret"));
    }
}

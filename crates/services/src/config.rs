use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "LINGUA_API_URL";
pub const API_TIMEOUT_VAR: &str = "LINGUA_API_TIMEOUT_SECS";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the practice server lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` does not parse as an http(s) url.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads `LINGUA_API_URL` and `LINGUA_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&raw_url)?;
        if let Some(raw) = lookup(API_TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
            config.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if `raw` is not a valid http(s) url.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive whole number of seconds.
    pub fn with_timeout_secs(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.timeout = parse_timeout(raw)?;
        Ok(self)
    }

    /// Base url, always ending with `/` so relative endpoint paths nest under it.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use reqwest::Url;

pub const DEFAULT_PRODUCTION_BASE_URL: &str = "/api/v1";
pub const DEFAULT_DEVELOPMENT_BASE_URL: &str = "http://localhost:8010/api/v1";
/// Slow backend operations (LLM report generation) can take minutes.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown APP_ENV: {0} (expected 'production' or 'development')")]
    InvalidMode(String),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("relative base URL {0} needs APP_ORIGIN to resolve against")]
    RelativeBaseUrl(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Deployment style; selects the default base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
}

impl EnvMode {
    /// Parse `production`/`prod` or `development`/`dev`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidMode(raw.to_owned())),
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Production => DEFAULT_PRODUCTION_BASE_URL,
            Self::Development => DEFAULT_DEVELOPMENT_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: EnvMode,
    /// Explicit override; `None` means the mode's default.
    pub base_url_override: Option<String>,
    /// Origin a relative base URL is resolved against.
    pub origin: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    #[must_use]
    pub fn new(mode: EnvMode) -> Self {
        Self { mode, base_url_override: None, origin: None, timeouts: Timeouts::default() }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `API_BASE_URL`: overrides the mode's default base URL
    /// - `APP_ENV`: `production` or `development` (default)
    /// - `APP_ORIGIN`: origin for a relative base URL
    /// - `API_TIMEOUT_SECS`: default 300
    /// - `API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for an unrecognised `APP_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for an unrecognised `APP_ENV`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match non_empty("APP_ENV") {
            Some(raw) => EnvMode::parse(&raw)?,
            None => EnvMode::Development,
        };
        let parse_secs = |key: &str, default: u64| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        Ok(Self {
            mode,
            base_url_override: non_empty("API_BASE_URL"),
            origin: non_empty("APP_ORIGIN"),
            timeouts: Timeouts {
                request_secs: parse_secs("API_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_secs("API_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        })
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EnvMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Configured base URL without a trailing slash, possibly relative.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.mode.default_base_url())
            .trim_end_matches('/')
    }

    /// Absolute base URL, resolving a relative base against the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RelativeBaseUrl`] when the base is relative and
    /// no origin is set, or [`ConfigError::InvalidBaseUrl`] when the result
    /// does not parse as a URL.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        let base = self.base_url();
        let absolute = if base.starts_with('/') || base.is_empty() {
            let origin = self
                .origin
                .as_deref()
                .ok_or_else(|| ConfigError::RelativeBaseUrl(base.to_owned()))?;
            format!("{}{}", origin.trim_end_matches('/'), base)
        } else {
            base.to_owned()
        };
        Url::parse(&absolute).map_err(|e| ConfigError::InvalidBaseUrl(format!("{absolute}: {e}")))?;
        Ok(absolute)
    }
}

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default values used when a variable is not set.
pub mod defaults {
    pub const BASE_URL: &str = "https://testgrid.k8s.io";
    pub const TAB_GROUPS: &str = "sig-release-master-blocking,sig-release-master-informing";
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const MAX_CONCURRENT_FETCHES: usize = 4;
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse log format from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TestGrid base URL, without trailing slash
    pub base_url: String,
    /// Tab groups to collect, in run order
    pub tab_groups: Vec<String>,
    /// HTTP connect timeout
    pub connect_timeout: Duration,
    /// HTTP total request timeout
    pub request_timeout: Duration,
    /// Maximum concurrent per-job table fetches
    pub max_concurrent_fetches: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: defaults::BASE_URL.to_string(),
            tab_groups: parse_tab_groups(defaults::TAB_GROUPS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            max_concurrent_fetches: defaults::MAX_CONCURRENT_FETCHES,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FT_BASE_URL`: TestGrid base URL (default: https://testgrid.k8s.io)
    /// - `FT_TAB_GROUPS`: Comma-separated tab groups (default: master blocking + informing)
    /// - `FT_CONNECT_TIMEOUT_SECS`: HTTP connect timeout (default: 5)
    /// - `FT_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 30)
    /// - `FT_MAX_CONCURRENT_FETCHES`: Enrichment pool size (default: 4)
    /// - `FT_LOG_FORMAT`: `text` or `json` (default: text)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("FT_BASE_URL")
            .unwrap_or_else(|_| defaults::BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let tab_groups = parse_tab_groups(
            &env::var("FT_TAB_GROUPS").unwrap_or_else(|_| defaults::TAB_GROUPS.to_string()),
        );

        let connect_timeout_secs = env::var("FT_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("FT_CONNECT_TIMEOUT_SECS must be a valid number")
            })?;

        let request_timeout_secs = env::var("FT_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("FT_REQUEST_TIMEOUT_SECS must be a valid number")
            })?;

        let max_concurrent_fetches = env::var("FT_MAX_CONCURRENT_FETCHES")
            .unwrap_or_else(|_| defaults::MAX_CONCURRENT_FETCHES.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("FT_MAX_CONCURRENT_FETCHES must be a valid number")
            })?;

        let log_format = match env::var("FT_LOG_FORMAT") {
            Ok(s) => LogFormat::parse(&s)
                .ok_or(ConfigError::InvalidValue("FT_LOG_FORMAT must be 'text' or 'json'"))?,
            Err(_) => LogFormat::Text,
        };

        let config = Config {
            base_url,
            tab_groups,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_concurrent_fetches,
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(format!(
                "FT_BASE_URL '{}' must start with http:// or https://",
                self.base_url
            ));
        }

        if self.tab_groups.is_empty() {
            errors.push("FT_TAB_GROUPS must name at least one tab group".to_string());
        }

        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            errors.push("HTTP timeouts must be greater than zero".to_string());
        }

        if self.max_concurrent_fetches == 0 {
            errors.push("FT_MAX_CONCURRENT_FETCHES must be at least 1".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(())
    }

    /// Configuration pointing at `base_url` with all other values at their defaults.
    pub fn with_base_url(base_url: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Config::default()
        }
    }
}

/// Split a comma-separated group list, dropping blanks.
pub fn parse_tab_groups(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

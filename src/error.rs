//! Domain error types for flake-tracker.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

/// Errors raised while collecting data from TestGrid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectError {
    /// Transport failure: connection refused, timeout or non-2xx response
    #[error("Fetch error for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Malformed or schema-mismatched JSON body
    #[error("Parse error for {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl CollectError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            CollectError::Fetch { url, .. } | CollectError::Parse { url, .. } => url,
        }
    }

    /// Build a fetch error from a reqwest failure.
    pub fn fetch(url: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        CollectError::Fetch {
            url: url.to_string(),
            reason,
        }
    }

    /// Build a parse error from a serde_json failure.
    pub fn parse(url: &str, err: &serde_json::Error) -> Self {
        CollectError::Parse {
            url: url.to_string(),
            reason: format!("JSON parsing error: {}", err),
        }
    }
}

/// Convenience type alias for Results with CollectError.
pub type CollectResult<T> = Result<T, CollectError>;

//! Twitter-specific error types.

use thiserror::Error;

/// Errors raised by the Twitter client.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Twitter API returned an error status
    #[error("Twitter API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl TwitterError {
    /// The HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) => None,
        }
    }

    /// Whether the error indicates Twitter-side write rate limiting.
    ///
    /// The classic API rejected throttled writes with 403; the modern API
    /// uses 429. Both put the sender into its cooldown.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.status(), Some(403) | Some(429))
    }
}

/// Result type for Twitter client operations.
pub type TwitterResult<T> = Result<T, TwitterError>;

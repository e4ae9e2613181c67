//! Recipewrangler error types

use std::time::Duration;

/// Recipewrangler error types
#[derive(Debug, thiserror::Error)]
pub enum WranglerError {
    // Transport/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Soft errors
    #[error("empty response from service")]
    EmptyResponse,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl WranglerError {
    /// Whether retrying the operation may succeed.
    ///
    /// Transport failures, timeouts, rate limits, and 5xx responses are
    /// transient; everything else (authentication, missing recipes, bad
    /// input, decode failures) is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            WranglerError::Http(_)
            | WranglerError::Timeout { .. }
            | WranglerError::RateLimited { .. } => true,
            WranglerError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Server-supplied retry hint, if any.
    ///
    /// Only `RateLimited` carries one (parsed from a `Retry-After` header).
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            WranglerError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for recipewrangler operations
pub type Result<T> = std::result::Result<T, WranglerError>;

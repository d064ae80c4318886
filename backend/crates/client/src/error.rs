//! Client Error Types

use thiserror::Error;

/// Client-specific result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No usable credentials; the session was cleared
    #[error("Not authenticated")]
    Unauthorized,

    /// Token refresh failed; the session was cleared
    #[error("Session refresh failed")]
    RefreshFailed,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Session persistence failure
    #[error("Session store error: {0}")]
    Store(String),
}

impl ClientError {
    /// True for failures worth retrying on idempotent requests
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => *status >= 500,
            ClientError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

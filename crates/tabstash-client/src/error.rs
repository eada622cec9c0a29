//! Error types for the task-list client.

use tabstash_auth::AcquisitionError;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the request executor and task operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A credential could not be produced; no request was attempted.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// The service kept rejecting our credential after the retry budget was
    /// spent; the user must reauthenticate out-of-band.
    #[error("Authorization rejected after retry; reauthentication required")]
    Unauthorized,

    /// Non-success response other than 401. Never retried.
    #[error("Request rejected with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport-level failure (connection, timeout). Never retried.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing or invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Transport(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            ClientError::Transport(format!("Connection failed: {}", e))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

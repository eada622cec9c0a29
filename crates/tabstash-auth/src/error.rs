//! Error types for credential acquisition.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AcquisitionError>;

/// Why the identity layer could not produce a credential.
///
/// These are expected, recoverable outcomes (the user declined, nothing is
/// cached, the identity endpoint is unreachable) — never panics.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// No cached credential and non-interactive acquisition may not mint one.
    #[error("No cached credential available: {0}")]
    NotCached(String),

    /// The identity provider refused to issue a credential.
    #[error("Credential denied: {0}")]
    Denied(String),

    /// The user cancelled an interactive acquisition.
    #[error("Credential acquisition cancelled")]
    Cancelled,

    /// Network error reaching the identity provider.
    #[error("Network error: {0}")]
    Network(String),

    /// Credential storage could not be read or written.
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// Stored or returned credential data could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AcquisitionError {
    fn from(e: reqwest::Error) -> Self {
        AcquisitionError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AcquisitionError {
    fn from(e: serde_json::Error) -> Self {
        AcquisitionError::Serialization(e.to_string())
    }
}

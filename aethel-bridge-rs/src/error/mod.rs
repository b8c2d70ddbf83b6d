//! Error handling for the Aethel bridge
//!
//! The bridge keeps its error surface small. Backend request failures are
//! not errors at all (they are [`crate::dispatch::RequestOutcome`] values,
//! logged and discarded), so the only true errors are local: client
//! construction, payload serialization, and calls into feature stubs.

use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for the Aethel bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Client or bridge configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payload serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operations that exist in the API surface but are not implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl BridgeError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        BridgeError::Configuration(message.into())
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        BridgeError::Serialization(message.into())
    }

    /// Create a not-implemented error
    pub fn not_implemented(message: impl Into<String>) -> Self {
        BridgeError::NotImplemented(message.into())
    }

    /// Check whether this error marks a feature stub rather than a failure
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, BridgeError::NotImplemented(_))
    }
}

/// Convert serde_json errors to BridgeError
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::serialization(format!("JSON error: {}", err))
    }
}

//! Domain error types
//!
//! This module defines the error hierarchy for dossier-prefill. Errors raised by
//! third-party clients (tokio-postgres, reqwest) are converted at the boundary of
//! the component performing the I/O and never leak into the public API.

use thiserror::Error;

/// Main error type
///
/// Every fallible operation of the crate returns this type. Use [`PrefillError::kind`]
/// to branch on the failure category rather than matching on individual variants.
#[derive(Debug, Error)]
pub enum PrefillError {
    /// Configuration-related errors (missing credential, invalid file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No record matched
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input rejected before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// Case provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failure category, independent of which component raised the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration
    Configuration,
    /// Record store unreachable or failing
    Connection,
    /// Zero matching records
    NotFound,
    /// Malformed search input
    Validation,
    /// Non-201 answer from the case provider
    Provider,
    /// Network failure while talking to the case provider
    Transport,
    /// Anything else (local I/O, serialization)
    Internal,
}

impl PrefillError {
    /// Returns the failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrefillError::Configuration(_) => ErrorKind::Configuration,
            PrefillError::Store(_) => ErrorKind::Connection,
            PrefillError::NotFound(_) => ErrorKind::NotFound,
            PrefillError::Validation(_) => ErrorKind::Validation,
            PrefillError::Provider(ProviderError::Transport(_)) => ErrorKind::Transport,
            PrefillError::Provider(_) => ErrorKind::Provider,
            PrefillError::Serialization(_) | PrefillError::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Record store errors
///
/// Shared by the PostgreSQL and Grist backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to record store: {0}")]
    ConnectionFailed(String),

    /// Authentication rejected by the store
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Query rejected or failed while running
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Unexpected payload from the store
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Case provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with something other than 201 Created
    #[error("Case creation rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never got an answer
    #[error("Transport failure: {0}")]
    Transport(String),

    /// 201 Created but the body could not be used
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for PrefillError {
    fn from(err: std::io::Error) -> Self {
        PrefillError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PrefillError {
    fn from(err: serde_json::Error) -> Self {
        PrefillError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PrefillError {
    fn from(err: toml::de::Error) -> Self {
        PrefillError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrefillError::Configuration("API token missing".to_string());
        assert_eq!(err.to_string(), "Configuration error: API token missing");
    }

    #[test]
    fn test_store_error_maps_to_connection_kind() {
        let err: PrefillError = StoreError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, PrefillError::Store(_)));
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[test]
    fn test_provider_error_kinds() {
        let rejected: PrefillError = ProviderError::Rejected {
            status: 422,
            body: "{\"error\":\"bad field\"}".to_string(),
        }
        .into();
        assert_eq!(rejected.kind(), ErrorKind::Provider);
        assert!(rejected.to_string().contains("bad field"));

        let transport: PrefillError = ProviderError::Transport("dns".to_string()).into();
        assert_eq!(transport.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PrefillError = io_err.into();
        assert!(matches!(err, PrefillError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PrefillError = toml_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = PrefillError::Validation("bad name".to_string());
        let _: &dyn std::error::Error = &err;
        let _: &dyn std::error::Error = &StoreError::Timeout("5s".to_string());
    }
}

//! Error types for the datamend client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message shown when the backend gives no usable error detail.
pub const GENERIC_API_ERROR: &str = "An error occurred";

/// A shared error type for the datamend crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DatamendError {
    /// A candidate file failed pre-flight validation; no request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backend answered a request with a non-success status.
    #[error("API error: {message}")]
    Api {
        /// HTTP status code, when one was received
        status: Option<u16>,
        /// Normalized human-readable message
        message: String,
    },

    /// The request never produced a usable response (connection, timeout,
    /// or an undecodable body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error (reading local files before upload)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DatamendError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Api error
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The single human-readable string surfaced to workflow state.
    ///
    /// Api errors carry the message already normalized from the response
    /// body; transport failures collapse to the generic fallback so the
    /// rendering layer never shows raw socket or decode details.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(reason) => reason.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Transport(_) => GENERIC_API_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for DatamendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DatamendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("JSON decode failed: {err}"))
    }
}

/// A type alias for `Result<T, DatamendError>`.
pub type Result<T> = std::result::Result<T, DatamendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_api_body_message() {
        let err = DatamendError::api(Some(400), "bad pattern");
        assert_eq!(err.user_message(), "bad pattern");
    }

    #[test]
    fn user_message_collapses_transport_to_generic() {
        let err = DatamendError::transport("connection refused");
        assert_eq!(err.user_message(), GENERIC_API_ERROR);
    }

    #[test]
    fn user_message_passes_validation_reason_through() {
        let err = DatamendError::validation("Please upload a CSV or Excel file");
        assert_eq!(err.user_message(), "Please upload a CSV or Excel file");
    }
}

//! Error types for the DataDeck client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire DataDeck client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every user-facing failure
/// eventually collapses into one of these variants; the presentation layer
/// only ever shows the display string.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DeckError {
    /// Authentication failure (bad credentials, profile fetch failure)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Backend fetch failure (listing, table page, chart summary, delete)
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Local upload validation failure (type/size check, no network involved)
    #[error("Invalid upload: {0}")]
    UploadValidation(String),

    /// Upload transport failure (network or server error during upload)
    #[error("Upload failed: {0}")]
    UploadTransport(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeckError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates an UploadValidation error
    pub fn upload_validation(message: impl Into<String>) -> Self {
        Self::UploadValidation(message.into())
    }

    /// Creates an UploadTransport error
    pub fn upload_transport(message: impl Into<String>) -> Self {
        Self::UploadTransport(message.into())
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

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Check if this is a local upload validation error
    pub fn is_upload_validation(&self) -> bool {
        matches!(self, Self::UploadValidation(_))
    }

    /// Check if this is an upload transport error
    pub fn is_upload_transport(&self) -> bool {
        matches!(self, Self::UploadTransport(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeckError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DeckError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DeckError>`.
pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::auth("invalid credentials");
        assert_eq!(err.to_string(), "Authentication failed: invalid credentials");
    }

    #[test]
    fn test_type_checks() {
        assert!(DeckError::fetch("x").is_fetch());
        assert!(DeckError::upload_validation("x").is_upload_validation());
        assert!(!DeckError::fetch("x").is_auth());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DeckError = io.into();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}

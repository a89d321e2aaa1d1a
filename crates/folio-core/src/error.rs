//! Error types for the folio client.

use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// The variants follow the failure taxonomy of the application: validation
/// failures are caught before any network call, authentication failures carry
/// the backend's human-readable rejection, authorization failures mark a
/// session that is no longer valid, and everything else is a generic
/// transport or server fault surfaced at the call site.
#[derive(Error, Debug)]
pub enum FolioError {
    /// A field was rejected by client-side validation.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Several validation failures reported together.
    #[error("{} fields failed validation", .0.len())]
    Multiple(Vec<FolioError>),

    /// Login was rejected; the message is the backend `detail` when present.
    #[error("{0}")]
    Auth(String),

    /// A protected call was refused because the bearer token is missing,
    /// invalid, or expired.
    #[error("authorization failed: the session is no longer valid")]
    Unauthorized,

    /// Any other failure status from the backend.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(String),

    /// IO error (file system operations).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FolioError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for a single field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates an Auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates an Api error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an Http error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error (single-field or collected).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Multiple(_))
    }

    /// Check if this is an authentication (login) rejection.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this marks an invalidated session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FolioError>`.
pub type Result<T> = std::result::Result<T, FolioError>;

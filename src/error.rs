//! Error types for the helpdesk backend
//!
//! Every failure reported to a caller falls into one of a small set of stable
//! categories (see [`ErrorKind`]). Transports map the category onto their own
//! status codes; the human-readable message travels alongside it.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Stable, machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Forbidden,
    Conflict,
    NotFound,
    Integrity,
    Unauthenticated,
    Internal,
}

impl ErrorKind {
    /// Stable code identifier
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::Integrity => "INTEGRITY",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Main error type for the helpdesk backend
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// Malformed input: bad enum value, empty text, unknown reference
    #[error("{0}")]
    Validation(String),

    /// The identity's role does not permit the action
    #[error("{0}")]
    Forbidden(String),

    /// The ticket is held by someone else
    #[error("{0}")]
    Conflict(String),

    /// The entity is absent or outside the caller's visibility scope
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A referenced record cannot be removed
    #[error("{0}")]
    Integrity(String),

    /// No identity could be resolved for the request
    #[error("Authentication credentials were not provided or are invalid.")]
    Unauthenticated,

    /// Storage directory has not been initialized
    #[error("Storage not initialized at {}. Run 'helpdesk init' first.", .0.display())]
    StorageNotInitialized(PathBuf),

    /// Another writer held the store lock for too long
    #[error("Timed out after {waited:?} waiting for storage lock {}", .path.display())]
    LockTimeout { path: PathBuf, waited: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HelpdeskError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a not-found error for an entity kind and id
    pub fn not_found(kind: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create an integrity error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Integrity(_) => ErrorKind::Integrity,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::StorageNotInitialized(_)
            | Self::LockTimeout { .. }
            | Self::Io(_)
            | Self::Yaml(_)
            | Self::Json(_)
            | Self::Config(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is caused by the caller rather than the system
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Internal)
    }
}

impl From<config::ConfigError> for HelpdeskError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            HelpdeskError::validation("Invalid status.").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            HelpdeskError::forbidden("Not allowed.").kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            HelpdeskError::conflict("Ticket is already assigned.").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            HelpdeskError::not_found("Ticket", "abc").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            HelpdeskError::integrity("in use").kind(),
            ErrorKind::Integrity
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(HelpdeskError::from(io).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HelpdeskError::validation("Comment cannot be empty.").to_string(),
            "Comment cannot be empty."
        );
        assert_eq!(
            HelpdeskError::not_found("Ticket", "42").to_string(),
            "Ticket not found: 42"
        );
        assert_eq!(ErrorKind::NotFound.code(), "NOT_FOUND");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(HelpdeskError::Unauthenticated.is_client_error());
        assert!(!HelpdeskError::config("bad").is_client_error());
    }
}

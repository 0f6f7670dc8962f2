//! Error types for bsky-session.

use thiserror::Error;

/// Main error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The persistence medium rejected a read, write or remove.
    #[error("persistence error for key '{key}': {source}")]
    Persistence {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not valid session data.
    #[error("stored session is malformed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Session could not be encoded for storage.
    #[error("failed to encode session: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A transition that spawns a resume request ran outside a Tokio runtime.
    #[error("no tokio runtime available to run the resume request")]
    NoRuntime,

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a client while resuming a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResumeError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service rejected session (HTTP {status}){}", describe(.error, .message))]
    Rejected {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },

    /// The resume task was cancelled or panicked before it settled.
    #[error("resume request aborted")]
    Aborted,
}

fn describe(error: &Option<String>, message: &Option<String>) -> String {
    match (error, message) {
        (Some(e), Some(m)) => format!(": {}: {}", e, m),
        (Some(e), None) => format!(": {}", e),
        (None, Some(m)) => format!(": {}", m),
        (None, None) => String::new(),
    }
}

/// Convenience Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_display() {
        let err = SessionError::Persistence {
            key: "atp-session".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(err.to_string().contains("atp-session"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_deserialization_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = SessionError::Deserialization(json_err);
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_rejected_display() {
        let err = ResumeError::Rejected {
            status: 401,
            error: Some("ExpiredToken".into()),
            message: Some("Token has expired".into()),
        };
        assert_eq!(
            err.to_string(),
            "service rejected session (HTTP 401): ExpiredToken: Token has expired"
        );

        let bare = ResumeError::Rejected {
            status: 502,
            error: None,
            message: None,
        };
        assert_eq!(bare.to_string(), "service rejected session (HTTP 502)");
    }
}

//! Error types for the audit and refactor passes.
//!
//! Every fallible operation in the crate returns [`AuditResult`]; nothing
//! is retried, so any error here ends the run.

use std::path::PathBuf;

/// The main error type for audit and refactor operations.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// I/O error (file read/write, permissions, etc.)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Regex compilation error
    #[error("Invalid regex pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSS selector that failed to parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Invalid or missing path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Progress bar template error
    #[error("Progress template error: {0}")]
    Template(String),
}

/// Result type alias using AuditError
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a regex error with pattern context
    pub fn regex(source: regex::Error, pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for AuditError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = AuditError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            Some(PathBuf::from("/site/index.html")),
        );
        assert!(err.to_string().contains("/site/index.html"));
    }

    #[test]
    fn test_selector_error_display() {
        let err = AuditError::selector("a[", "unexpected end of input");
        assert!(err.to_string().contains("a["));
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AuditError = io_err.into();
        assert!(matches!(err, AuditError::Io { path: None, .. }));
    }
}

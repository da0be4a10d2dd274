//! Error types for geocluster.
//!
//! Every failure is reported synchronously to the direct caller as a
//! [`ClusterError`] carrying an [`ErrorCode`] and a human-readable message.

use std::fmt;
use thiserror::Error;

/// Error conditions raised by the clustering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A count, size or record was outside its accepted domain.
    InvalidArgument,
    /// An input did not satisfy an ordering precondition.
    FailedPrecondition,
    /// A referenced entity does not exist.
    NotFound,
    /// Internal logic error.
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::FailedPrecondition => write!(f, "FAILED_PRECONDITION"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Main error type for clustering operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct ClusterError {
    code: ErrorCode,
    message: String,
}

impl ClusterError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, msg)
    }

    /// Create a failed precondition error.
    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::FailedPrecondition, msg)
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, msg)
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ClusterError::invalid_argument("k must be positive");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(err.message(), "k must be positive");
    }

    #[test]
    fn test_error_display() {
        let err = ClusterError::not_found("entity 06037 missing");
        let display = format!("{}", err);
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("entity 06037 missing"));
    }

    #[test]
    fn test_precondition_display() {
        let err = ClusterError::failed_precondition("not sorted");
        assert_eq!(err.to_string(), "FAILED_PRECONDITION: not sorted");
    }
}

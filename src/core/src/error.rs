//! Error types for the content store
//!
//! Store errors only arise while building paths or mutating the store.
//! Reading through a snapshot never fails.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the content store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed node path or path segment
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Node or property not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid operation for the current state
    #[error("Invalid: {0}")]
    Invalid(String),
}

impl CoreError {
    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        CoreError::InvalidPath(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }
}

//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use thiserror::Error;

/// Main error type for matrix and aggregator operations
#[derive(Error, Debug)]
pub enum MatrixError {
    /// I/O errors (file missing, truncated read, write failures).
    /// Fatal to the in-progress serialization; never retried.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Out-of-range location access or malformed bulk-row write
    #[error("index error: {message}")]
    Index { message: String },

    /// Lookup of an unregistered row, column, or reference key
    #[error("key not found: {message}")]
    KeyNotFound { message: String },

    /// Structural mismatch (e.g. label sequence shorter than the declared dimension)
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },
}

/// Type alias for Results using MatrixError
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    /// Create an index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
        }
    }

    /// Create a key-not-found error
    pub fn key_not_found(message: impl Into<String>) -> Self {
        Self::KeyNotFound {
            message: message.into(),
        }
    }

    /// Create a dimension-mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }
}

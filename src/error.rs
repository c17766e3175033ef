//! Error types for the stylerank library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`StyleRankError`] enum. Convenience constructors are provided for the
//! common string-carrying variants.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for stylerank operations.
#[derive(Error, Debug)]
pub enum StyleRankError {
    /// I/O errors (local storage files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store-related errors (item store, profile store, local storage).
    #[error("Store error: {0}")]
    Store(String),

    /// Embedding construction or lookup errors.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Two vectors that must agree in length do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected vector length.
        expected: usize,
        /// The length actually observed.
        actual: usize,
    },

    /// An index into an ordered collection was out of range.
    #[error("Index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the collection.
        len: usize,
    },

    /// Form or argument validation failure with a user-visible message.
    #[error("{0}")]
    Validation(String),

    /// A requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation exceeded its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`StyleRankError`].
pub type Result<T> = std::result::Result<T, StyleRankError>;

impl StyleRankError {
    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Store(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Embedding(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Validation(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        StyleRankError::NotFound(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Timeout(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StyleRankError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = StyleRankError::store("unreachable");
        assert_eq!(error.to_string(), "Store error: unreachable");

        let error = StyleRankError::not_found("item abc");
        assert_eq!(error.to_string(), "Not found: item abc");

        let error = StyleRankError::DimensionMismatch {
            expected: 512,
            actual: 256,
        };
        assert_eq!(
            error.to_string(),
            "Dimension mismatch: expected 512, got 256"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let error = StyleRankError::from(io_error);

        match error {
            StyleRankError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let error = StyleRankError::validation("Please enter a valid email address");
        assert_eq!(error.to_string(), "Please enter a valid email address");
    }
}

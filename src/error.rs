//! Error types for the nearspan library.
//!
//! All errors are represented by the [`NearSpanError`] enum. Running out of
//! positions is never an error: a spent stream simply ends the match
//! sequence, while anything reported here aborts the query evaluation.
//!
//! # Examples
//!
//! ```
//! use nearspan::error::{NearSpanError, Result};
//!
//! fn build_query(clauses: usize) -> Result<()> {
//!     if clauses < 2 {
//!         return Err(NearSpanError::invalid_query("need at least two clauses"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(build_query(1).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for nearspan operations.
#[derive(Error, Debug)]
pub enum NearSpanError {
    /// I/O errors surfaced by a position source or the CLI.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The query cannot be evaluated as constructed.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A position stream failed while being advanced.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with NearSpanError.
pub type Result<T> = std::result::Result<T, NearSpanError>;

impl NearSpanError {
    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        NearSpanError::InvalidQuery(msg.into())
    }

    /// Create a new stream error.
    pub fn stream<S: Into<String>>(msg: S) -> Self {
        NearSpanError::Stream(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        NearSpanError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        NearSpanError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        NearSpanError::Other(format!("Internal error: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = NearSpanError::invalid_query("one clause");
        assert_eq!(error.to_string(), "Invalid query: one clause");

        let error = NearSpanError::stream("postings truncated");
        assert_eq!(error.to_string(), "Stream error: postings truncated");

        let error = NearSpanError::config("max_docs must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: max_docs must be positive"
        );

        let error = NearSpanError::internal("unpositioned");
        assert_eq!(error.to_string(), "Error: Internal error: unpositioned");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let error = NearSpanError::from(io_error);

        match error {
            NearSpanError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}

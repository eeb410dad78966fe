//! Error types for the Pelta library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`PeltaError`] enum. The first five variants are the ones callers are
//! expected to branch on:
//!
//! - [`PeltaError::NotFitted`] - transform or predict before fit/load
//! - [`PeltaError::NotFound`] - load with no persisted artifact
//! - [`PeltaError::Data`] - corpus too small or single-class
//! - [`PeltaError::ModelNotReady`] - inference with nothing loaded or trained
//! - [`PeltaError::Storage`] - persistence failures
//!
//! # Examples
//!
//! ```
//! use pelta::error::{PeltaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PeltaError::data("corpus has a single class"))
//! }
//!
//! match example_operation() {
//!     Err(PeltaError::Data(msg)) => assert!(msg.contains("single class")),
//!     _ => unreachable!(),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Pelta operations.
#[derive(Error, Debug)]
pub enum PeltaError {
    /// A component was used before it was fitted.
    #[error("Not fitted: {0}")]
    NotFitted(String),

    /// No persisted artifact exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The training corpus cannot be used (too small, single class, bad labels).
    #[error("Data error: {0}")]
    Data(String),

    /// Inference was requested while no model is loaded or trained.
    #[error("Model not ready: {0}")]
    ModelNotReady(String),

    /// Persistence failed (write, rename, corrupt file).
    #[error("Storage error: {0}")]
    Storage(String),

    /// The artifact was produced by a different preprocessing pipeline or format.
    #[error("Incompatible artifact: {0}")]
    IncompatibleArtifact(String),

    /// Analysis-related errors (invalid patterns, filter failures).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors outside the model store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PeltaError.
pub type Result<T> = std::result::Result<T, PeltaError>;

impl PeltaError {
    /// Create a new not-fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        PeltaError::NotFitted(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        PeltaError::NotFound(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        PeltaError::Data(msg.into())
    }

    /// Create a new model-not-ready error.
    pub fn model_not_ready<S: Into<String>>(msg: S) -> Self {
        PeltaError::ModelNotReady(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        PeltaError::Storage(msg.into())
    }

    /// Create a new incompatible-artifact error.
    pub fn incompatible<S: Into<String>>(msg: S) -> Self {
        PeltaError::IncompatibleArtifact(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PeltaError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PeltaError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PeltaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PeltaError::not_fitted("vectorizer");
        assert_eq!(error.to_string(), "Not fitted: vectorizer");

        let error = PeltaError::data("only one class");
        assert_eq!(error.to_string(), "Data error: only one class");

        let error = PeltaError::storage("rename failed");
        assert_eq!(error.to_string(), "Storage error: rename failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let pelta_error = PeltaError::from(io_error);

        match pelta_error {
            PeltaError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}

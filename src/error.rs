//! Error types for the dwc-validator library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for validator operations.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns in a record set are not row-aligned.
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The name-matching service answered with a non-success status.
    #[error("Name-matching service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Every tier of the name-resolution fallback chain failed for one name.
    ///
    /// Recoverable: the aggregation layer catches this per name and reports
    /// the name as unresolved instead of aborting the run.
    #[error("Name resolution exhausted for '{name}'")]
    ResolutionExhausted { name: String },

    /// The overall resolution deadline elapsed before a call completed.
    #[error("Resolution deadline exceeded")]
    DeadlineExceeded,
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;

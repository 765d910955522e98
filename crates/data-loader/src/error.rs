//! Error types for the data-loader crate.
//!
//! Every failure carries enough context (file or source name, record
//! position, field) to point at the offending entry in the input document.

use thiserror::Error;

/// Errors that can occur while loading and parsing place records
#[derive(Error, Debug)]
pub enum PlaceLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is not valid JSON or does not have the expected shape
    #[error("Parse error in {origin}: {reason}")]
    ParseError { origin: String, reason: String },

    /// A record is missing a field that cannot be defaulted
    #[error("Record {position} in {origin} is missing {field}")]
    MissingField {
        origin: String,
        position: usize,
        field: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Catalog validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PlaceLoadError>;

//! Error types for the sources crate.

use data_loader::PlaceLoadError;
use thiserror::Error;

/// Errors that can occur while fetching places from a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The static document could not be loaded or parsed
    #[error("Failed to load places: {0}")]
    Load(#[from] PlaceLoadError),

    /// The place-search request could not be sent or its body not decoded
    #[error("Place search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The place-search endpoint answered with a non-success status
    #[error("Place search returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A blocking load task did not complete
    #[error("Load task failed: {0}")]
    Task(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SourceError>;

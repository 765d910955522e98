//! Static File Source - places from a JSON document on disk

use crate::error::{Result, SourceError};
use data_loader::{PlaceRecord, parser};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Loads an array of place records from a JSON file
#[derive(Debug, Clone)]
pub struct StaticFileSource {
    path: PathBuf,
}

impl StaticFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file on the blocking pool
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<PlaceRecord>> {
        let path = self.path.clone();
        let places = tokio::task::spawn_blocking(move || parser::parse_places_file(&path))
            .await
            .map_err(|e| SourceError::Task(e.to_string()))??;

        debug!("Loaded {} places from file", places.len());
        Ok(places)
    }
}

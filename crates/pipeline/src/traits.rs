//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a place list.

use anyhow::Result;
use data_loader::PlaceRecord;

/// Core trait for filtering places.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Contract
/// - Filters take ownership of the Vec<PlaceRecord> and return the kept records
/// - Relative order of kept records is preserved
/// - Applying the same filter twice gives the same result as applying it once
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of places.
    fn apply(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>>;
}

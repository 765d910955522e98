//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::criteria::FilterCriteria;
use crate::filters::{PriceFilterStage, TagFilterStage};
use crate::traits::Filter;
use anyhow::Result;
use data_loader::PlaceRecord;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(PriceFilterStage::new(PriceFilter::default_band()))
///     .add_filter(TagFilterStage::new(TagFilter::Tag("photo wall".into())));
///
/// let filtered = pipeline.apply(places)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The price then tag pipeline for a set of user criteria
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self::new()
            .add_filter(PriceFilterStage::new(criteria.price.clone()))
            .add_filter(TagFilterStage::new(criteria.tag.clone()))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the places.
    ///
    /// Each filter's input and output counts are logged at debug level.
    pub fn apply(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>> {
        let mut current = places;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{PriceFilter, TagFilter};
    use data_loader::Coordinate;

    fn place(id: &str, price: Option<f64>, tags: &[&str]) -> PlaceRecord {
        let mut place = PlaceRecord::new(id, id, Coordinate::new(31.2, 121.4));
        place.avg_price = price;
        place.tags = tags.iter().map(|s| s.to_string()).collect();
        place
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let places = vec![place("1", Some(100.0), &[]), place("2", None, &[])];

        let filtered = pipeline.apply(places).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_from_criteria_applies_both_filters() {
        let criteria = FilterCriteria::new(
            PriceFilter::default_band(),
            TagFilter::Tag("terrace".to_string()),
        );
        let pipeline = FilterPipeline::from_criteria(&criteria);
        assert_eq!(pipeline.len(), 2);

        let places = vec![
            place("1", Some(100.0), &["terrace"]),
            place("2", Some(300.0), &["terrace"]),
            place("3", Some(300.0), &["live music"]),
            place("4", None, &["terrace"]),
        ];

        let filtered = pipeline.apply(places).unwrap();
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }
}

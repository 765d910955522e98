//! Pipeline for filtering and ranking restaurant places.
//!
//! This crate provides:
//! - The haversine distance function
//! - FilterCriteria and the Filter trait with price and tag filters
//! - FilterPipeline for composing filters
//! - Ranker for distance assignment and scoring
//! - The lottery draw
//!
//! ## Architecture
//! A place list is processed in stages:
//! 1. Filters remove places outside the selected price band or tag
//! 2. Ranker assigns each remaining place its distance and score
//! 3. Places are sorted by score, best first (stable)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterCriteria, FilterPipeline, Ranker};
//!
//! let pipeline = FilterPipeline::from_criteria(&criteria);
//! let filtered = pipeline.apply(catalog.places().to_vec())?;
//! let ranked = Ranker::default().rank(filtered, user.coordinate);
//! let lucky = pipeline::lottery::draw(&ranked, &mut rand::rng());
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod geo;
pub mod lottery;
pub mod ranking;
pub mod traits;

// Re-export main types
pub use criteria::{CriteriaError, FilterCriteria, PriceFilter, TagFilter};
pub use filter_pipeline::FilterPipeline;
pub use geo::{EARTH_RADIUS_M, haversine_distance};
pub use ranking::{RankedPlace, Ranker, ScoreWeights};
pub use traits::Filter;

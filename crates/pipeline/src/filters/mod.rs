//! Filter implementations for the place pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod price;
pub mod tag;

// Re-export for convenience
pub use price::PriceFilterStage;
pub use tag::TagFilterStage;

//! # Data Loader Crate
//!
//! This crate handles loading restaurant records and holding them for a session.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Coordinate, PlaceRecord, PlaceCatalog)
//! - **parser**: Parse JSON documents of either source schema into records
//! - **featured**: The bundled list of featured places
//! - **index**: Build and validate the catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{PlaceCatalog, featured_places, parser};
//! use std::path::Path;
//!
//! let mut places = parser::parse_places_file(Path::new("data/places.json"))?;
//! places.extend(featured_places()?);
//! let catalog = PlaceCatalog::from_places(places)?;
//! let place = catalog.get_place("101").unwrap();
//! println!("{} has {} labels", place.name, place.label_count());
//! ```

pub mod error;
pub mod featured;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{PlaceLoadError, Result};
pub use featured::featured_places;
pub use parser::RawPlace;
pub use types::{Coordinate, PlaceCatalog, PlaceId, PlaceRecord};

//! # Sources Crate
//!
//! This crate produces the two inputs of a recommendation session:
//!
//! ### User location
//! A `LocationProvider` is asked once; on failure the session falls back
//! to a fixed coordinate and remembers why.
//!
//! ### Places
//! - `StaticFileSource`: a JSON array on disk
//! - `PlaceSearchClient`: nearby results from a place-search API
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{PlaceSource, StaticFileSource, FixedLocation, resolve_location};
//!
//! let location = resolve_location(&FixedLocation(Coordinate::new(31.23, 121.47)));
//! let source = PlaceSource::StaticFile(StaticFileSource::new("data/places.json"));
//! let places = source.fetch_places(&location).await?;
//! ```

pub mod error;
pub mod location;
pub mod place_search;
pub mod static_file;
pub mod types;

pub use error::{Result, SourceError};
pub use location::{
    EnvLocation, FixedLocation, LocationError, LocationProvider, NoLocation, resolve_location,
};
pub use place_search::PlaceSearchClient;
pub use static_file::StaticFileSource;
pub use types::{FALLBACK_LOCATION, LocationOrigin, UserLocation};

use data_loader::PlaceRecord;
use tracing::info;

/// Where a session's places come from
#[derive(Debug, Clone)]
pub enum PlaceSource {
    StaticFile(StaticFileSource),
    PlaceSearch(PlaceSearchClient),
}

impl PlaceSource {
    /// Returns the name of this source (for logging)
    pub fn name(&self) -> &str {
        match self {
            PlaceSource::StaticFile(_) => "StaticFile",
            PlaceSource::PlaceSearch(_) => "PlaceSearch",
        }
    }

    /// Fetch places for a user at `location`.
    ///
    /// A static file ignores the location; the search source queries around it.
    pub async fn fetch_places(&self, location: &UserLocation) -> Result<Vec<PlaceRecord>> {
        let places = match self {
            PlaceSource::StaticFile(source) => source.load().await?,
            PlaceSource::PlaceSearch(client) => client.search_nearby(location.coordinate).await?,
        };
        info!("{} returned {} places", self.name(), places.len());
        Ok(places)
    }
}

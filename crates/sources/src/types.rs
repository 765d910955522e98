//! Shared types for place sources.

use data_loader::Coordinate;
use serde::Serialize;

/// Coordinate used when no location can be obtained (central Shanghai)
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(31.2304, 121.4737);

/// Where a session's user location came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LocationOrigin {
    /// Reported by a location provider
    Provided,
    /// The provider failed; `reason` is shown to the user
    Fallback { reason: String },
}

/// The user's position for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLocation {
    pub coordinate: Coordinate,
    pub origin: LocationOrigin,
}

impl UserLocation {
    pub fn provided(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            origin: LocationOrigin::Provided,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            coordinate: FALLBACK_LOCATION,
            origin: LocationOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, LocationOrigin::Fallback { .. })
    }
}

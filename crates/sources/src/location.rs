//! User location resolution.
//!
//! A `LocationProvider` is asked once per session. When it cannot answer,
//! the session continues from `FALLBACK_LOCATION` and the reason is kept on
//! the resulting `UserLocation` so the caller can tell the user.

use crate::types::UserLocation;
use data_loader::Coordinate;
use std::env;
use thiserror::Error;
use tracing::{info, warn};

/// Default environment variable read by `EnvLocation`
pub const LOCATION_ENV_VAR: &str = "DINE_LOCATION";

/// Why a provider could not supply a location
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The user or platform refused access
    #[error("location access denied: {0}")]
    Denied(String),

    /// No location source is present
    #[error("location is not available")]
    Unavailable,

    /// A location was supplied but is not a valid coordinate
    #[error("invalid location '{0}'")]
    Invalid(String),
}

/// Anything that can report the user's current position.
pub trait LocationProvider: Send + Sync {
    /// Returns the name of this provider (for logging)
    fn name(&self) -> &str;

    /// Report the current position
    fn locate(&self) -> Result<Coordinate, LocationError>;
}

/// A position given up front, e.g. from command-line flags
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn name(&self) -> &str {
        "FixedLocation"
    }

    fn locate(&self) -> Result<Coordinate, LocationError> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(LocationError::Invalid(format!("{},{}", self.0.lat, self.0.lng)))
        }
    }
}

/// Reads `"lat,lng"` from an environment variable
pub struct EnvLocation {
    var: String,
}

impl EnvLocation {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvLocation {
    fn default() -> Self {
        Self::new(LOCATION_ENV_VAR)
    }
}

impl LocationProvider for EnvLocation {
    fn name(&self) -> &str {
        "EnvLocation"
    }

    fn locate(&self) -> Result<Coordinate, LocationError> {
        match env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => parse_lat_lng(&value),
            Ok(_) => Err(LocationError::Unavailable),
            Err(env::VarError::NotPresent) => Err(LocationError::Unavailable),
            Err(env::VarError::NotUnicode(_)) => {
                Err(LocationError::Denied(format!("{} is not valid unicode", self.var)))
            }
        }
    }
}

/// A provider that never has a position
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn name(&self) -> &str {
        "NoLocation"
    }

    fn locate(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Parse `"lat,lng"` into a valid coordinate
pub fn parse_lat_lng(value: &str) -> Result<Coordinate, LocationError> {
    let invalid = || LocationError::Invalid(value.to_string());

    let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    let coordinate = Coordinate::new(lat, lng);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(invalid())
    }
}

/// Ask the provider once, falling back to `FALLBACK_LOCATION` on any error
pub fn resolve_location(provider: &dyn LocationProvider) -> UserLocation {
    match provider.locate() {
        Ok(coordinate) => {
            info!(
                "Location from {}: {:.4},{:.4}",
                provider.name(),
                coordinate.lat,
                coordinate.lng
            );
            UserLocation::provided(coordinate)
        }
        Err(e) => {
            warn!("{} failed ({}), using default location", provider.name(), e);
            UserLocation::fallback(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FALLBACK_LOCATION, LocationOrigin};

    #[test]
    fn test_fixed_location() {
        let location = resolve_location(&FixedLocation(Coordinate::new(39.9, 116.4)));
        assert_eq!(location.coordinate, Coordinate::new(39.9, 116.4));
        assert_eq!(location.origin, LocationOrigin::Provided);
    }

    #[test]
    fn test_invalid_fixed_location_falls_back() {
        let location = resolve_location(&FixedLocation(Coordinate::new(95.0, 0.0)));
        assert_eq!(location.coordinate, FALLBACK_LOCATION);
        assert!(location.is_fallback());
    }

    #[test]
    fn test_no_location_falls_back() {
        let location = resolve_location(&NoLocation);
        assert_eq!(location.coordinate, Coordinate::new(31.2304, 121.4737));
        assert_eq!(
            location.origin,
            LocationOrigin::Fallback {
                reason: "location is not available".to_string()
            }
        );
    }

    #[test]
    fn test_unset_env_var_is_unavailable() {
        let provider = EnvLocation::new("DINE_PICKS_TEST_LOCATION_NEVER_SET");
        assert_eq!(provider.locate(), Err(LocationError::Unavailable));
    }

    #[test]
    fn test_parse_lat_lng() {
        assert_eq!(parse_lat_lng("31.2, 121.5"), Ok(Coordinate::new(31.2, 121.5)));
        assert!(matches!(parse_lat_lng("31.2"), Err(LocationError::Invalid(_))));
        assert!(matches!(parse_lat_lng("north,east"), Err(LocationError::Invalid(_))));
        assert!(matches!(parse_lat_lng("10,200"), Err(LocationError::Invalid(_))));
    }
}

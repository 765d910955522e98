//! In-memory map widget model.
//!
//! Mirrors what a map widget is told to display: a centered view, one
//! marker for the user and one marker per recommended place. Place markers
//! are replaced wholesale on every sync.

use crate::config::MapConfig;
use data_loader::{Coordinate, PlaceId};
use pipeline::RankedPlace;
use serde::Serialize;
use tracing::debug;

pub const USER_MARKER_COLOR: &str = "#e94e77";
pub const USER_MARKER_POPUP: &str = "Your location";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    /// Widget default color when `None`
    pub color: Option<String>,
    pub popup: String,
    /// Set for place markers
    pub place_id: Option<PlaceId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    #[serde(skip_serializing)]
    access_token: String,
    style: String,
    center: Coordinate,
    zoom: f64,
    user_marker: Marker,
    place_markers: Vec<Marker>,
}

impl MapView {
    /// A view centered on the user with the user marker placed
    pub fn new(config: &MapConfig, center: Coordinate) -> Self {
        Self {
            access_token: config.access_token.clone(),
            style: config.style.clone(),
            center,
            zoom: config.zoom,
            user_marker: Marker {
                coordinate: center,
                color: Some(USER_MARKER_COLOR.to_string()),
                popup: USER_MARKER_POPUP.to_string(),
                place_id: None,
            },
            place_markers: Vec::new(),
        }
    }

    /// Remove every place marker and add one per place.
    ///
    /// Returns the number of markers removed.
    pub fn sync_markers(&mut self, places: &[RankedPlace]) -> usize {
        let removed = self.place_markers.len();
        self.place_markers = places
            .iter()
            .map(|ranked| Marker {
                coordinate: ranked.place.coordinate,
                color: None,
                popup: ranked.place.name.clone(),
                place_id: Some(ranked.place.id.clone()),
            })
            .collect();

        debug!(
            "Map markers synced: removed {}, added {}",
            removed,
            self.place_markers.len()
        );
        removed
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn user_marker(&self) -> &Marker {
        &self.user_marker
    }

    pub fn place_markers(&self) -> &[Marker] {
        &self.place_markers
    }
}

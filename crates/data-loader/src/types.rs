//! Core domain types for restaurant data.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `Coordinate` for geographic positions
//! - `PlaceRecord` for one restaurant as loaded from a source
//! - `PlaceCatalog`, the in-memory record set held for a session

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a place.
///
/// Sources deliver either numeric ids (static files) or opaque strings
/// (place-search results); both are normalized to their string form.
pub type PlaceId = String;

// =============================================================================
// Geography
// =============================================================================

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid degree ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

// =============================================================================
// PlaceRecord
// =============================================================================

/// One restaurant.
///
/// Identity fields (`id`, `name`, `coordinate`) never change after creation.
/// Distance to the user is not stored here; it is derived during ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: PlaceId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Average spend per person
    pub avg_price: Option<f64>,
    /// Display label for the price tier, e.g. "premium"
    pub price_level: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Category tags
    pub tags: Vec<String>,
    /// Occasion labels ("first date", "surprise"...)
    pub scene: Vec<String>,
    /// Seasonal menu labels
    pub seasonal: Vec<String>,
    pub comments: Vec<String>,
    /// Photo URLs, first one is used as the card image
    pub photos: Vec<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub success_rate: Option<f64>,
    pub wait_warning: Option<String>,
    pub has_socket: Option<bool>,
}

impl PlaceRecord {
    /// Minimal record with every optional attribute empty
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            avg_price: None,
            price_level: None,
            rating: None,
            review_count: None,
            tags: Vec::new(),
            scene: Vec::new(),
            seasonal: Vec::new(),
            comments: Vec::new(),
            photos: Vec::new(),
            phone: None,
            address: None,
            success_rate: None,
            wait_warning: None,
            has_socket: None,
        }
    }

    /// Number of tag and scene labels together
    pub fn label_count(&self) -> usize {
        self.tags.len() + self.scene.len()
    }

    /// True if `label` appears among the tags or the scene labels
    pub fn has_label(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t == label) || self.scene.iter().any(|s| s == label)
    }
}

// =============================================================================
// PlaceCatalog - the session's record set
// =============================================================================

/// Holds all records of a session, in load order, plus lookup indices.
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    /// Records in order of first appearance
    pub(crate) places: Vec<PlaceRecord>,
    /// Position of each id inside `places`
    pub(crate) by_id: HashMap<PlaceId, usize>,
    /// Place ids grouped by tag or scene label (sorted for stable listing)
    pub(crate) label_index: BTreeMap<String, Vec<PlaceId>>,
}

impl PlaceCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a place by id
    pub fn get_place(&self, id: &str) -> Option<&PlaceRecord> {
        self.by_id.get(id).map(|&pos| &self.places[pos])
    }

    /// All places in load order
    pub fn places(&self) -> &[PlaceRecord] {
        &self.places
    }

    /// Ids of places carrying `label` as a tag or scene label
    pub fn places_with_label(&self, label: &str) -> &[PlaceId] {
        self.label_index
            .get(label)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every known tag or scene label, sorted
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.label_index.keys().map(|s| s.as_str())
    }

    /// Insert a place.
    ///
    /// A record whose id is already present replaces the earlier one in place,
    /// so the catalog keeps the order of first appearance.
    pub fn insert_place(&mut self, place: PlaceRecord) {
        match self.by_id.get(&place.id) {
            Some(&pos) => self.places[pos] = place,
            None => {
                self.by_id.insert(place.id.clone(), self.places.len());
                self.places.push(place);
            }
        }
    }

    /// Number of places
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

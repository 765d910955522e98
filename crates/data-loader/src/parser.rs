//! Parser for place documents.
//!
//! Two record shapes are accepted by the same lenient parser:
//! - place-search results: `location` as `{lat, lon}` or `"lng,lat"`,
//!   `per_capita`, `tel`, `photos: [{url}]`, `;`-separated tag strings
//! - static files: top-level `lat`/`lng`, `avg_price`, `price_level`,
//!   `seasonal`, `comments` and the other descriptive fields
//!
//! Numeric fields may arrive as JSON numbers or numeric strings, and empty
//! values may arrive as `""` or `[]`; all of those normalize to `None`.

use crate::error::{PlaceLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One record as it appears on the wire, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlace {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub location: Option<Value>,
    pub lat: Option<Value>,
    #[serde(alias = "lon")]
    pub lng: Option<Value>,
    pub per_capita: Option<Value>,
    pub avg_price: Option<Value>,
    pub price: Option<Value>,
    pub price_level: Option<Value>,
    pub rating: Option<Value>,
    pub review_count: Option<Value>,
    pub tags: Option<Value>,
    pub scene: Option<Value>,
    pub seasonal: Option<Value>,
    pub comments: Option<Value>,
    pub photos: Option<Value>,
    #[serde(alias = "phone")]
    pub tel: Option<Value>,
    pub address: Option<Value>,
    pub success_rate: Option<Value>,
    pub wait_warning: Option<Value>,
    pub has_socket: Option<Value>,
}

impl RawPlace {
    /// Normalize into a `PlaceRecord`.
    ///
    /// `origin` names the document and `position` is the 1-based index of the
    /// record inside it; both only feed error messages.
    pub fn into_record(self, origin: &str, position: usize) -> Result<PlaceRecord> {
        let missing = |field: &str| PlaceLoadError::MissingField {
            origin: origin.to_string(),
            position,
            field: field.to_string(),
        };

        let id = self
            .id
            .as_ref()
            .and_then(value_to_text)
            .ok_or_else(|| missing("id"))?;
        let name = self
            .name
            .as_ref()
            .and_then(value_to_text)
            .ok_or_else(|| missing("name"))?;
        let coordinate = self.coordinate().ok_or_else(|| missing("coordinate"))?;
        if !coordinate.is_valid() {
            return Err(PlaceLoadError::InvalidValue {
                field: "coordinate".to_string(),
                value: format!("{},{}", coordinate.lat, coordinate.lng),
            });
        }

        // per_capita wins over avg_price, which wins over a bare price
        let avg_price = [&self.per_capita, &self.avg_price, &self.price]
            .into_iter()
            .flatten()
            .find_map(value_to_f64);
        if let Some(price) = avg_price {
            if !price.is_finite() || price < 0.0 {
                return Err(PlaceLoadError::InvalidValue {
                    field: format!("avg_price of {id}"),
                    value: price.to_string(),
                });
            }
        }

        let rating = self.rating.as_ref().and_then(value_to_f64);
        if let Some(rating) = rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(PlaceLoadError::InvalidValue {
                    field: format!("rating of {id}"),
                    value: rating.to_string(),
                });
            }
        }

        Ok(PlaceRecord {
            id,
            name,
            coordinate,
            avg_price,
            price_level: self.price_level.as_ref().and_then(value_to_text),
            rating,
            review_count: self
                .review_count
                .as_ref()
                .and_then(value_to_f64)
                .filter(|n| *n >= 0.0)
                .map(|n| n as u32),
            tags: self.tags.as_ref().map(value_to_list).unwrap_or_default(),
            scene: self.scene.as_ref().map(value_to_list).unwrap_or_default(),
            seasonal: self.seasonal.as_ref().map(value_to_list).unwrap_or_default(),
            comments: self.comments.as_ref().map(value_to_list).unwrap_or_default(),
            photos: self.photos.as_ref().map(photo_urls).unwrap_or_default(),
            phone: self.tel.as_ref().and_then(value_to_text),
            address: self.address.as_ref().and_then(value_to_text),
            success_rate: self.success_rate.as_ref().and_then(value_to_f64),
            wait_warning: self.wait_warning.as_ref().and_then(value_to_text),
            has_socket: self.has_socket.as_ref().and_then(Value::as_bool),
        })
    }

    /// Coordinate from `location` (object or "lng,lat" string), else from `lat`/`lng`
    fn coordinate(&self) -> Option<Coordinate> {
        if let Some(location) = &self.location {
            match location {
                Value::Object(map) => {
                    let lat = map.get("lat").and_then(value_to_f64)?;
                    let lng = map
                        .get("lon")
                        .or_else(|| map.get("lng"))
                        .and_then(value_to_f64)?;
                    return Some(Coordinate::new(lat, lng));
                }
                Value::String(s) => {
                    let (lng, lat) = s.split_once(',')?;
                    let lng = lng.trim().parse().ok()?;
                    let lat = lat.trim().parse().ok()?;
                    return Some(Coordinate::new(lat, lng));
                }
                _ => {}
            }
        }
        let lat = self.lat.as_ref().and_then(value_to_f64)?;
        let lng = self.lng.as_ref().and_then(value_to_f64)?;
        Some(Coordinate::new(lat, lng))
    }
}

/// Parse a JSON array of place records
pub fn parse_places_str(json: &str, origin: &str) -> Result<Vec<PlaceRecord>> {
    let raw: Vec<RawPlace> =
        serde_json::from_str(json).map_err(|e| PlaceLoadError::ParseError {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(idx, place)| place.into_record(origin, idx + 1))
        .collect()
}

/// Parse a JSON file holding an array of place records
pub fn parse_places_file(path: &Path) -> Result<Vec<PlaceRecord>> {
    if !path.exists() {
        return Err(PlaceLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_places_str(&content, &path.display().to_string())
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Arrays map element-wise; a single string is split on `;`
fn value_to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_to_text).collect(),
        Value::String(s) => s
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Photos are either plain URL strings or objects with a `url` field
fn photo_urls(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => map.get("url").and_then(value_to_text),
                other => value_to_text(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

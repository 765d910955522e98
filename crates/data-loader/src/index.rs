//! PlaceCatalog building and indexing logic.
//!
//! - Build the catalog from parsed records
//! - Build the label index used to list tag choices
//! - Validate value ranges

use crate::error::{PlaceLoadError, Result};
use crate::types::*;

impl PlaceCatalog {
    /// Build a validated catalog from already parsed records
    pub fn from_places(places: impl IntoIterator<Item = PlaceRecord>) -> Result<Self> {
        let mut catalog = PlaceCatalog::new();
        for place in places {
            catalog.insert_place(place);
        }
        catalog.build_secondary_indices();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Rebuild the label index from the current records
    pub fn build_secondary_indices(&mut self) {
        self.label_index.clear();
        for place in &self.places {
            for label in place.tags.iter().chain(place.scene.iter()) {
                let ids = self.label_index.entry(label.clone()).or_default();
                // a label listed as both tag and scene counts once
                if ids.last() != Some(&place.id) {
                    ids.push(place.id.clone());
                }
            }
        }
    }

    /// Check that:
    /// - coordinates are inside valid degree ranges
    /// - ratings are within 0.0 - 5.0
    /// - prices are non-negative
    pub fn validate(&self) -> Result<()> {
        for place in &self.places {
            if !place.coordinate.is_valid() {
                return Err(PlaceLoadError::InvalidValue {
                    field: format!("coordinate of {}", place.id),
                    value: format!("{},{}", place.coordinate.lat, place.coordinate.lng),
                });
            }
            if let Some(rating) = place.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(PlaceLoadError::InvalidValue {
                        field: format!("rating of {}", place.id),
                        value: rating.to_string(),
                    });
                }
            }
            if let Some(price) = place.avg_price {
                if !price.is_finite() || price < 0.0 {
                    return Err(PlaceLoadError::InvalidValue {
                        field: format!("avg_price of {}", place.id),
                        value: price.to_string(),
                    });
                }
            }
        }
        if self.by_id.len() != self.places.len() {
            return Err(PlaceLoadError::ValidationError(
                "id index out of sync with records".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, tags: &[&str], scene: &[&str]) -> PlaceRecord {
        let mut place = PlaceRecord::new(id, format!("Place {id}"), Coordinate::new(31.2, 121.4));
        place.tags = tags.iter().map(|s| s.to_string()).collect();
        place.scene = scene.iter().map(|s| s.to_string()).collect();
        place
    }

    #[test]
    fn test_label_index() {
        let catalog = PlaceCatalog::from_places(vec![
            place("1", &["terrace", "live music"], &["first date"]),
            place("2", &["terrace"], &["terrace"]),
        ])
        .unwrap();

        assert_eq!(catalog.places_with_label("terrace"), ["1", "2"]);
        assert_eq!(catalog.places_with_label("first date"), ["1"]);
        assert!(catalog.places_with_label("rooftop").is_empty());

        let labels: Vec<&str> = catalog.labels().collect();
        assert_eq!(labels, vec!["first date", "live music", "terrace"]);
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut bad = place("1", &[], &[]);
        bad.rating = Some(7.5);
        let err = PlaceCatalog::from_places(vec![bad]).unwrap_err();
        assert!(matches!(err, PlaceLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_negative_price() {
        let mut bad = place("1", &[], &[]);
        bad.avg_price = Some(-5.0);
        assert!(PlaceCatalog::from_places(vec![bad]).is_err());
    }
}

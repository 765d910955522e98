//! Fixed list of featured places appended to every loaded catalog.

use crate::error::Result;
use crate::parser;
use crate::types::PlaceRecord;

const FEATURED_PLACES_JSON: &str = include_str!("../data/featured_places.json");

/// Parse the bundled featured places
pub fn featured_places() -> Result<Vec<PlaceRecord>> {
    parser::parse_places_str(FEATURED_PLACES_JSON, "featured_places.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_places_parse() {
        let places = featured_places().unwrap();
        assert_eq!(places.len(), 4);
        assert!(places.iter().all(|p| p.avg_price.is_some() && p.rating.is_some()));
        assert_eq!(places[0].id, "101");
        assert!(places[0].has_label("safe first date"));
    }
}

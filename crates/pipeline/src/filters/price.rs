//! Filter on average price or price level.

use crate::criteria::PriceFilter;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::PlaceRecord;

/// Keeps places whose price satisfies the selector.
///
/// ## Rules
/// - `Any`: keep everything
/// - `Band`: keep places whose average price is inside the band; places
///   without a price, or priced at 0 (unknown in search results), are kept
/// - `Level`: keep places whose price level equals the label
pub struct PriceFilterStage {
    selector: PriceFilter,
}

impl PriceFilterStage {
    pub fn new(selector: PriceFilter) -> Self {
        Self { selector }
    }

    fn keeps(&self, place: &PlaceRecord) -> bool {
        match &self.selector {
            PriceFilter::Any => true,
            PriceFilter::Band { min, max } => match place.avg_price {
                Some(price) if price > 0.0 => (*min..=*max).contains(&price),
                _ => true,
            },
            PriceFilter::Level(level) => place.price_level.as_deref() == Some(level.as_str()),
        }
    }
}

impl Filter for PriceFilterStage {
    fn name(&self) -> &str {
        "PriceFilter"
    }

    fn apply(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>> {
        if self.selector.is_any() {
            return Ok(places);
        }
        Ok(places.into_iter().filter(|place| self.keeps(place)).collect())
    }
}

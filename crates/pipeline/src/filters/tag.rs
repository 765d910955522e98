//! Filter on tag or scene label.

use crate::criteria::TagFilter;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::PlaceRecord;

/// Keeps places whose tags or scene labels contain the selected tag.
pub struct TagFilterStage {
    selector: TagFilter,
}

impl TagFilterStage {
    pub fn new(selector: TagFilter) -> Self {
        Self { selector }
    }
}

impl Filter for TagFilterStage {
    fn name(&self) -> &str {
        "TagFilter"
    }

    fn apply(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>> {
        let tag = match &self.selector {
            TagFilter::Any => return Ok(places),
            TagFilter::Tag(tag) => tag,
        };
        Ok(places.into_iter().filter(|place| place.has_label(tag)).collect())
    }
}

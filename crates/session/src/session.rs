//! # Recommendation Session
//!
//! Holds the state of one user's session and drives the pipeline:
//! 1. Resolve the user location (fallback on failure)
//! 2. Fetch places and the featured list concurrently
//! 3. Build the catalog
//! 4. Filter and rank on every criteria change
//! 5. Sync the map markers and clear the lottery highlight
//!
//! The session is owned by a single caller; every event runs synchronously
//! once the initial fetch is done.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info};

use data_loader::{PlaceCatalog, PlaceId, PlaceRecord, featured_places};
use pipeline::{FilterCriteria, FilterPipeline, RankedPlace, Ranker};
use sources::{LocationOrigin, LocationProvider, PlaceSource, UserLocation, resolve_location};

use crate::config::SessionConfig;
use crate::map::MapView;
use crate::render::render_recommend_list;

pub struct RecommendationSession {
    catalog: Arc<PlaceCatalog>,
    location: UserLocation,
    criteria: FilterCriteria,
    ranker: Ranker,
    /// Current filtered and ranked list, best first
    current: Vec<RankedPlace>,
    /// Id of the lottery pick, cleared on every refresh
    highlighted: Option<PlaceId>,
    map: Option<MapView>,
}

impl RecommendationSession {
    /// Run the startup sequence and build a session with no filters applied.
    ///
    /// A location failure falls back silently (the reason is kept on the
    /// location); a fetch failure is returned.
    pub async fn start(
        config: &SessionConfig,
        provider: &dyn LocationProvider,
        source: &PlaceSource,
    ) -> Result<Self> {
        let start_time = Instant::now();

        let location = resolve_location(provider);
        let places = fetch_with_featured(source, &location, config.include_featured).await?;
        info!("Fetched {} places (featured included: {})", places.len(), config.include_featured);

        let catalog = PlaceCatalog::from_places(places).context("Failed to build place catalog")?;
        let map = MapView::new(&config.map, location.coordinate);

        let mut session = Self::new(Arc::new(catalog), location)?;
        session.attach_map(map);

        info!(
            "Session ready with {} places in {:.2?}",
            session.catalog.len(),
            start_time.elapsed()
        );
        Ok(session)
    }

    /// A session over an existing catalog, ranked with no filters
    pub fn new(catalog: Arc<PlaceCatalog>, location: UserLocation) -> Result<Self> {
        let mut session = Self {
            catalog,
            location,
            criteria: FilterCriteria::default(),
            ranker: Ranker::default(),
            current: Vec::new(),
            highlighted: None,
            map: None,
        };
        session.refresh()?;
        Ok(session)
    }

    /// Replace the ranker and re-rank
    pub fn set_ranker(&mut self, ranker: Ranker) -> Result<&[RankedPlace]> {
        self.ranker = ranker;
        self.refresh()?;
        Ok(&self.current)
    }

    /// Attach a map and place the current markers on it
    pub fn attach_map(&mut self, mut map: MapView) {
        map.sync_markers(&self.current);
        self.map = Some(map);
    }

    /// Apply new criteria and rebuild the list
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<&[RankedPlace]> {
        self.criteria = criteria;
        self.refresh()?;
        Ok(&self.current)
    }

    /// Filter, rank, clear the highlight and resync the map.
    pub fn refresh(&mut self) -> Result<()> {
        let pipeline = FilterPipeline::from_criteria(&self.criteria);
        let filtered = pipeline
            .apply(self.catalog.places().to_vec())
            .context("Failed to filter places")?;

        self.current = self.ranker.rank(filtered, self.location.coordinate);
        self.highlighted = None;
        if let Some(map) = self.map.as_mut() {
            map.sync_markers(&self.current);
        }

        info!(
            "Recommendations refreshed: {} of {} places (price: {}, tag: {})",
            self.current.len(),
            self.catalog.len(),
            self.criteria.price,
            self.criteria.tag
        );
        Ok(())
    }

    /// Pick one of the current recommendations and highlight it.
    ///
    /// Returns `None` and leaves the highlight untouched when the list is empty.
    pub fn draw_lottery<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PlaceId> {
        let picked = pipeline::lottery::draw(&self.current, rng)?.place.id.clone();
        debug!("Lottery picked {}", picked);
        self.highlighted = Some(picked.clone());
        Some(picked)
    }

    pub fn recommendations(&self) -> &[RankedPlace] {
        &self.current
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// The highlighted entry of the current list
    pub fn highlighted_place(&self) -> Option<&RankedPlace> {
        let id = self.highlighted.as_deref()?;
        self.current.iter().find(|r| r.place.id == id)
    }

    pub fn location(&self) -> &UserLocation {
        &self.location
    }

    /// Reason shown to the user when the fallback location is in use
    pub fn fallback_notice(&self) -> Option<&str> {
        match &self.location.origin {
            LocationOrigin::Fallback { reason } => Some(reason),
            LocationOrigin::Provided => None,
        }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn catalog(&self) -> &PlaceCatalog {
        &self.catalog
    }

    /// Tag selector options: every tag and scene label in the catalog
    pub fn tag_options(&self) -> Vec<&str> {
        self.catalog.labels().collect()
    }

    pub fn map(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    /// Card markup for the current list
    pub fn render_cards(&self) -> String {
        render_recommend_list(&self.current, self.highlighted.as_deref())
    }
}

/// Fetch from `source` and, when asked, load the featured list alongside it.
///
/// Featured places are appended after the fetched ones.
async fn fetch_with_featured(
    source: &PlaceSource,
    location: &UserLocation,
    include_featured: bool,
) -> Result<Vec<PlaceRecord>> {
    if !include_featured {
        return source
            .fetch_places(location)
            .await
            .with_context(|| format!("Failed to fetch places from {}", source.name()));
    }

    let (fetched, featured) = tokio::join!(
        source.fetch_places(location),
        tokio::task::spawn_blocking(featured_places),
    );

    let mut places =
        fetched.with_context(|| format!("Failed to fetch places from {}", source.name()))?;
    let featured = featured
        .context("Featured places task failed")?
        .context("Failed to load featured places")?;

    debug!("Appending {} featured places", featured.len());
    places.extend(featured);
    Ok(places)
}

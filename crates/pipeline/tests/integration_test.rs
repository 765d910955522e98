//! Integration tests for the pipeline.
//!
//! These tests verify that filters, ranking and the lottery work together
//! on a realistic catalog.

use data_loader::{Coordinate, PlaceCatalog, PlaceRecord, featured_places};
use pipeline::lottery;
use pipeline::{FilterCriteria, FilterPipeline, PriceFilter, Ranker, TagFilter, haversine_distance};
use rand::SeedableRng;
use rand::rngs::StdRng;

const USER: Coordinate = Coordinate::new(31.2304, 121.4737);

fn create_test_catalog() -> PlaceCatalog {
    let mut noodle = PlaceRecord::new("1", "Noodle Bar", Coordinate::new(31.2310, 121.4740));
    noodle.rating = Some(4.3);
    noodle.avg_price = Some(45.0);
    noodle.tags = vec!["late night".to_string()];

    let mut unpriced = PlaceRecord::new("2", "Pop-up Kitchen", Coordinate::new(31.2250, 121.4800));
    unpriced.rating = Some(4.0);
    unpriced.tags = vec!["photo wall".to_string()];

    let local = vec![noodle, unpriced];
    let featured = featured_places().unwrap();

    PlaceCatalog::from_places(local.into_iter().chain(featured)).unwrap()
}

fn run(catalog: &PlaceCatalog, criteria: &FilterCriteria) -> Vec<pipeline::RankedPlace> {
    let filtered = FilterPipeline::from_criteria(criteria)
        .apply(catalog.places().to_vec())
        .unwrap();
    Ranker::default().rank(filtered, USER)
}

#[test]
fn test_worked_example_ranks_a_first() {
    let mut a = PlaceRecord::new("A", "A", USER);
    a.rating = Some(4.9);
    a.avg_price = Some(500.0);
    a.tags = vec!["x".to_string(), "y".to_string()];

    // roughly 5 km due north
    let north = Coordinate::new(USER.lat + 5000.0 / 111_194.93, USER.lng);
    let mut b = PlaceRecord::new("B", "B", north);
    b.rating = Some(4.5);
    b.avg_price = Some(100.0);
    b.tags = vec!["x".to_string()];

    let ranked = Ranker::default().rank(vec![b, a], USER);

    assert_eq!(ranked[0].place.id, "A");
    assert!((ranked[0].score - 3.04).abs() < 1e-9);
    assert!((ranked[1].distance_m - 5000.0).abs() < 1.0);
    assert!((ranked[1].score - 2.65).abs() < 1e-4);
}

#[test]
fn test_filtering_is_idempotent() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria::new(
        PriceFilter::default_band(),
        TagFilter::Tag("photo wall".to_string()),
    );
    let pipeline = FilterPipeline::from_criteria(&criteria);

    let once = pipeline.apply(catalog.places().to_vec()).unwrap();
    let twice = pipeline.apply(once.clone()).unwrap();

    assert_eq!(once, twice);
    assert!(!once.is_empty());
}

#[test]
fn test_ranking_is_deterministic() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria::default();

    let first = run(&catalog, &criteria);
    let second = run(&catalog, &criteria);

    assert_eq!(first, second);
    assert_eq!(first.len(), catalog.len());
}

#[test]
fn test_tag_match_ignores_price_when_price_filter_disabled() {
    let catalog = create_test_catalog();
    // Retro Modern Cafe costs 88, outside the default band, but is tagged "photo wall"
    let criteria = FilterCriteria::new(PriceFilter::Any, TagFilter::Tag("photo wall".to_string()));

    let ranked = run(&catalog, &criteria);
    assert!(ranked.iter().any(|r| r.place.id == "103"));

    let banded = FilterCriteria::new(
        PriceFilter::default_band(),
        TagFilter::Tag("photo wall".to_string()),
    );
    let ranked = run(&catalog, &banded);
    assert!(!ranked.iter().any(|r| r.place.id == "103"));
    // no price means the band never excludes it
    assert!(ranked.iter().any(|r| r.place.id == "2"));
}

#[test]
fn test_distances_match_haversine() {
    let catalog = create_test_catalog();
    for ranked in run(&catalog, &FilterCriteria::default()) {
        let expected = haversine_distance(USER, ranked.place.coordinate);
        assert_eq!(ranked.distance_m, expected);
    }
}

#[test]
fn test_lottery_picks_from_filtered_list() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria::new(PriceFilter::Any, TagFilter::Tag("safe first date".to_string()));
    let ranked = run(&catalog, &criteria);

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let pick = lottery::draw(&ranked, &mut rng).unwrap();
        assert!(pick.place.has_label("safe first date"));
    }
}

#[test]
fn test_lottery_on_empty_filter_result() {
    let catalog = create_test_catalog();
    let criteria = FilterCriteria::new(PriceFilter::Any, TagFilter::Tag("no such tag".to_string()));
    let ranked = run(&catalog, &criteria);

    assert!(ranked.is_empty());
    assert!(lottery::draw(&ranked, &mut StdRng::seed_from_u64(3)).is_none());
}

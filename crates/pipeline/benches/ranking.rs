//! Benchmarks for filtering and ranking
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Coordinate, PlaceRecord};
use pipeline::{FilterCriteria, FilterPipeline, PriceFilter, Ranker, TagFilter};

const USER: Coordinate = Coordinate::new(31.2304, 121.4737);

fn synthetic_places(n: usize) -> Vec<PlaceRecord> {
    (0..n)
        .map(|i| {
            let offset = (i % 100) as f64 * 0.001;
            let mut place = PlaceRecord::new(
                i.to_string(),
                format!("Place {i}"),
                Coordinate::new(USER.lat + offset, USER.lng - offset),
            );
            place.rating = Some(3.0 + (i % 20) as f64 * 0.1);
            place.avg_price = Some(50.0 + (i % 30) as f64 * 40.0);
            place.tags = vec![format!("tag{}", i % 7)];
            place
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let places = synthetic_places(2_000);
    let ranker = Ranker::default();

    c.bench_function("rank_2000_places", |b| {
        b.iter(|| {
            let ranked = ranker.rank(black_box(places.clone()), black_box(USER));
            black_box(ranked)
        })
    });
}

fn bench_filter_and_rank(c: &mut Criterion) {
    let places = synthetic_places(2_000);
    let criteria = FilterCriteria::new(PriceFilter::default_band(), TagFilter::Tag("tag3".to_string()));
    let pipeline = FilterPipeline::from_criteria(&criteria);
    let ranker = Ranker::default();

    c.bench_function("filter_and_rank_2000_places", |b| {
        b.iter(|| {
            let filtered = pipeline.apply(black_box(places.clone())).unwrap();
            black_box(ranker.rank(filtered, USER))
        })
    });
}

criterion_group!(benches, bench_rank, bench_filter_and_rank);
criterion_main!(benches);

//! Distance assignment and scoring of filtered places.
//!
//! ## Score
//! ```text
//! score = rating * 0.6
//!       + (tags + scene labels) * 0.3
//!       - (avg_price / 100) * 0.1
//!       - distance_m / 20000
//! ```
//! A missing rating or price contributes nothing to its term.

use crate::geo::haversine_distance;
use data_loader::{Coordinate, PlaceRecord};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// A place with its distance to the user and its score.
///
/// Both values are derived for one user location and one filter pass;
/// they are recomputed whenever either changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlace {
    pub place: PlaceRecord,
    pub distance_m: f64,
    pub score: f64,
}

/// Weights of the scoring formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub rating: f64,
    /// Per tag or scene label
    pub labels: f64,
    pub price: f64,
    /// Price is divided by this before weighting
    pub price_unit: f64,
    /// Distance in meters is divided by this and subtracted
    pub distance_divisor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: 0.6,
            labels: 0.3,
            price: 0.1,
            price_unit: 100.0,
            distance_divisor: 20_000.0,
        }
    }
}

/// Scores places against a user location and orders them best first.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: ScoreWeights,
}

impl Ranker {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score one place at a known distance
    pub fn score(&self, place: &PlaceRecord, distance_m: f64) -> f64 {
        let w = &self.weights;
        let rating = place.rating.unwrap_or(0.0);
        let price = place.avg_price.unwrap_or(0.0);

        rating * w.rating + place.label_count() as f64 * w.labels
            - (price / w.price_unit) * w.price
            - distance_m / w.distance_divisor
    }

    /// Assign distances, score, and sort descending.
    ///
    /// The sort is stable: places with equal scores keep their input order.
    pub fn rank(&self, places: Vec<PlaceRecord>, origin: Coordinate) -> Vec<RankedPlace> {
        let mut ranked: Vec<RankedPlace> = places
            .into_par_iter()
            .map(|place| {
                let distance_m = haversine_distance(origin, place.coordinate);
                let score = self.score(&place, distance_m);
                RankedPlace {
                    place,
                    distance_m,
                    score,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!("Ranked {} places", ranked.len());
        ranked
    }
}

//! Random pick among the currently displayed places.

use crate::ranking::RankedPlace;
use rand::Rng;

/// Pick one place uniformly at random.
///
/// The index is `floor(r * len)` for a uniform `r` in `[0, 1)`.
/// Returns `None` for an empty list.
pub fn draw<'a, R: Rng + ?Sized>(places: &'a [RankedPlace], rng: &mut R) -> Option<&'a RankedPlace> {
    if places.is_empty() {
        return None;
    }
    let r: f64 = rng.random();
    let idx = ((r * places.len() as f64).floor() as usize).min(places.len() - 1);
    places.get(idx)
}

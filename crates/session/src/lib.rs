//! Session crate for the DinePicks recommender.
//!
//! This crate contains the stateful session that coordinates location,
//! place fetching, the filter/rank pipeline, card rendering and the map
//! model.

pub mod config;
pub mod map;
pub mod render;
pub mod session;

pub use config::{MapConfig, SearchConfig, SessionConfig};
pub use map::{MapView, Marker};
pub use render::{format_distance, navigation_url, render_card, render_recommend_list};
pub use session::RecommendationSession;

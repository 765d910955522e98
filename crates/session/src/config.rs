//! Session configuration read from the environment.
//!
//! | variable               | default                                   |
//! |------------------------|-------------------------------------------|
//! | `DINE_MAP_TOKEN`       | empty                                     |
//! | `DINE_MAP_STYLE`       | `mapbox://styles/mapbox/streets-v11`      |
//! | `DINE_MAP_ZOOM`        | `13`                                      |
//! | `DINE_SEARCH_ENDPOINT` | `https://mcp.amap.com/sse`                |
//! | `DINE_SEARCH_KEY`      | unset                                     |
//! | `DINE_SEARCH_KEYWORDS` | `restaurant`                              |
//! | `DINE_SEARCH_RADIUS`   | `2000`                                    |
//! | `DINE_FEATURED`        | `true`                                    |

use sources::PlaceSearchClient;
use sources::place_search::{DEFAULT_KEYWORDS, DEFAULT_RADIUS_M};
use std::env;

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v11";
pub const DEFAULT_MAP_ZOOM: f64 = 13.0;
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://mcp.amap.com/sse";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_string_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub access_token: String,
    pub style: String,
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style: DEFAULT_MAP_STYLE.to_string(),
            zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub endpoint: String,
    pub key: Option<String>,
    pub keywords: String,
    pub radius_m: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            key: None,
            keywords: DEFAULT_KEYWORDS.to_string(),
            radius_m: DEFAULT_RADIUS_M,
        }
    }
}

impl SearchConfig {
    /// Build a place-search client from this configuration
    pub fn client(&self) -> PlaceSearchClient {
        let client = PlaceSearchClient::new(self.endpoint.clone())
            .with_keywords(self.keywords.clone())
            .with_radius(self.radius_m);
        match &self.key {
            Some(key) => client.with_key(key.clone()),
            None => client,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub map: MapConfig,
    pub search: SearchConfig,
    /// Append the bundled featured places to every catalog
    pub include_featured: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            search: SearchConfig::default(),
            include_featured: true,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let map = MapConfig {
            access_token: env::var("DINE_MAP_TOKEN").unwrap_or_default(),
            style: env_string_or("DINE_MAP_STYLE", DEFAULT_MAP_STYLE),
            zoom: parse_env_or("DINE_MAP_ZOOM", DEFAULT_MAP_ZOOM),
        };

        let search = SearchConfig {
            endpoint: env_string_or("DINE_SEARCH_ENDPOINT", DEFAULT_SEARCH_ENDPOINT),
            key: env::var("DINE_SEARCH_KEY").ok().filter(|k| !k.trim().is_empty()),
            keywords: env_string_or("DINE_SEARCH_KEYWORDS", DEFAULT_KEYWORDS),
            radius_m: parse_env_or("DINE_SEARCH_RADIUS", DEFAULT_RADIUS_M),
        };

        Self {
            map,
            search,
            include_featured: parse_env_or("DINE_FEATURED", true),
        }
    }
}

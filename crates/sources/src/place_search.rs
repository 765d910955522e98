//! Place Search Source - nearby restaurants from a third-party search API
//!
//! ## Protocol
//! `POST {endpoint}?key={key}` with body `{keywords, location: "lng,lat", radius}`.
//! The response is `{pois: [...]}`; a missing or null `pois` means no results.
//!
//! Results that cannot be normalized (no id, no coordinate) are skipped
//! with a warning instead of failing the whole search.

use crate::error::{Result, SourceError};
use data_loader::{Coordinate, PlaceRecord, RawPlace};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default search keywords
pub const DEFAULT_KEYWORDS: &str = "restaurant";

/// Default search radius in meters
pub const DEFAULT_RADIUS_M: u32 = 2000;

/// Request body sent to the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub keywords: String,
    /// `"lng,lat"`
    pub location: String,
    pub radius: u32,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    pois: Option<Vec<RawPlace>>,
}

/// Client for the place-search endpoint
#[derive(Debug, Clone)]
pub struct PlaceSearchClient {
    client: reqwest::Client,
    endpoint: String,
    key: Option<String>,
    keywords: String,
    radius_m: u32,
}

impl PlaceSearchClient {
    /// Create a client for `endpoint` with default keywords and radius
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            key: None,
            keywords: DEFAULT_KEYWORDS.to_string(),
            radius_m: DEFAULT_RADIUS_M,
        }
    }

    /// Configure the API key sent as the `key` query parameter
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Configure the search keywords (default: "restaurant")
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    /// Configure the search radius in meters (default: 2000)
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request body for a search around `center`
    pub fn request_for(&self, center: Coordinate) -> SearchRequest {
        SearchRequest {
            keywords: self.keywords.clone(),
            location: format!("{},{}", center.lng, center.lat),
            radius: self.radius_m,
        }
    }

    /// Search for places around `center`
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn search_nearby(&self, center: Coordinate) -> Result<Vec<PlaceRecord>> {
        let body = self.request_for(center);
        debug!("Searching '{}' within {}m of {}", body.keywords, body.radius, body.location);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: SearchResponse = response.json().await?;
        let pois = response.pois.unwrap_or_default();
        let total = pois.len();

        let places: Vec<PlaceRecord> = pois
            .into_iter()
            .enumerate()
            .filter_map(|(idx, poi)| match poi.into_record(&self.endpoint, idx + 1) {
                Ok(place) => Some(place),
                Err(e) => {
                    warn!("Skipping search result: {}", e);
                    None
                }
            })
            .collect();

        debug!("Search returned {} results, {} usable", total, places.len());
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_body_uses_lng_lat_order() {
        let client = PlaceSearchClient::new("http://localhost/search").with_radius(500);
        let request = client.request_for(Coordinate::new(31.2304, 121.4737));

        assert_eq!(request.location, "121.4737,31.2304");
        assert_eq!(request.radius, 500);
        assert_eq!(request.keywords, "restaurant");
    }

    #[tokio::test]
    async fn test_search_nearby_parses_pois() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(query_param("key", "secret"))
            .and(body_json(json!({
                "keywords": "restaurant",
                "location": "121.4737,31.2304",
                "radius": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pois": [
                    {
                        "id": "B001",
                        "name": "Dumpling House",
                        "location": {"lat": 31.231, "lon": 121.474},
                        "per_capita": 60,
                        "rating": 4.4,
                        "tags": ["dumplings"]
                    },
                    {
                        "id": "B002",
                        "name": "No Coordinates"
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = PlaceSearchClient::new(format!("{}/search", mock_server.uri()))
            .with_key("secret");
        let places = client
            .search_nearby(Coordinate::new(31.2304, 121.4737))
            .await
            .unwrap();

        assert_eq!(places.len(), 1, "Result without coordinates should be skipped");
        assert_eq!(places[0].id, "B001");
        assert_eq!(places[0].avg_price, Some(60.0));
    }

    #[tokio::test]
    async fn test_out_of_range_values_are_skipped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pois": [
                    {
                        "id": "ok",
                        "name": "Hotpot Corner",
                        "location": "121.474,31.231",
                        "rating": 4.3
                    },
                    {
                        "id": "bad-rating",
                        "name": "Odd Rating",
                        "location": "121.475,31.232",
                        "rating": "5.5"
                    },
                    {
                        "id": "bad-price",
                        "name": "Odd Price",
                        "location": "121.476,31.233",
                        "per_capita": -10
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = PlaceSearchClient::new(mock_server.uri());
        let places = client
            .search_nearby(Coordinate::new(31.2304, 121.4737))
            .await
            .unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "ok");
    }

    #[tokio::test]
    async fn test_missing_pois_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "1"})))
            .mount(&mock_server)
            .await;

        let client = PlaceSearchClient::new(mock_server.uri());
        let places = client
            .search_nearby(Coordinate::new(31.0, 121.0))
            .await
            .unwrap();

        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("invalid key"))
            .mount(&mock_server)
            .await;

        let client = PlaceSearchClient::new(mock_server.uri());
        let err = client
            .search_nearby(Coordinate::new(31.0, 121.0))
            .await
            .unwrap_err();

        match err {
            SourceError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "invalid key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

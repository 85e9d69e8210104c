//! Turns a free-text address into a coordinate using a GeoJSON geocoding service.

use crate::cache::MemoCache;
use crate::geocoding::error::GeocodeError;
use crate::types::lat_lon::LatLon;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

/// Memoized geocoding results, keyed by the exact query string.
///
/// A `None` value records that the service answered but had no candidate.
pub type GeocodeCache = MemoCache<String, Option<LatLon>>;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: `[longitude, latitude]`, optionally followed by elevation.
    coordinates: Vec<f64>,
}

impl Geometry {
    fn position(&self) -> Option<LatLon> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some(LatLon::from_lon_lat([*lon, *lat])),
            _ => None,
        }
    }
}

pub struct Geocoder {
    client: Client,
    url: String,
    api_key: String,
    cache: Arc<GeocodeCache>,
}

impl Geocoder {
    pub fn new(
        client: Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        cache: Arc<GeocodeCache>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            cache,
        }
    }

    /// Looks up `query` and returns the coordinate of the first candidate.
    ///
    /// Identical queries are answered from the cache, including queries that
    /// previously matched nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(LatLon))` for the first returned feature, with the service's
    ///   `[lon, lat]` pair swapped into [`LatLon`] order.
    /// * `Ok(None)` if the service answered with zero features.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NetworkRequest`] if the service could not be
    /// reached (including timeouts), [`GeocodeError::HttpStatus`] for a non-2xx
    /// answer and [`GeocodeError::Decode`] for a body that is not a feature collection.
    pub async fn geocode(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
        self.cache
            .get_or_try_load(query.to_string(), || self.lookup(query))
            .await
    }

    async fn lookup(&self, query: &str) -> Result<Option<LatLon>, GeocodeError> {
        info!("Geocoding '{}' via {}", query, self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str()), ("text", query)])
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(self.url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.url, e);
                return Err(match e.status() {
                    Some(status) => GeocodeError::HttpStatus {
                        url: self.url.clone(),
                        status,
                        source: e,
                    },
                    None => GeocodeError::NetworkRequest(self.url.clone(), e),
                });
            }
        };

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| GeocodeError::Decode(self.url.clone(), e))?;

        let coordinate = collection
            .features
            .first()
            .and_then(|feature| feature.geometry.position());

        match coordinate {
            Some(found) => info!("Geocoded '{}' to {}", query, found),
            None => info!("No geocoding candidates for '{}'", query),
        }
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder_for(server: &MockServer) -> Geocoder {
        Geocoder::new(
            Client::new(),
            format!("{}/geocode/search", server.uri()),
            "test-key",
            Arc::new(GeocodeCache::new("geocode")),
        )
    }

    #[tokio::test]
    async fn test_geocode_swaps_lon_lat() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("text", "Moscow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [37.61, 55.75]}},
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-94.0, 46.0]}}
                ]
            })))
            .mount(&server)
            .await;

        let found = geocoder_for(&server).geocode("Moscow").await?;
        assert_eq!(found, Some(LatLon(55.75, 37.61)));
        Ok(())
    }

    #[tokio::test]
    async fn test_geocode_no_candidates_is_none() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"type": "FeatureCollection", "features": []})),
            )
            .mount(&server)
            .await;

        assert_eq!(geocoder_for(&server).geocode("Nowhere at all").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_geocode_accepts_elevation_and_rejects_short_positions() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .and(query_param("text", "Everest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{"geometry": {"coordinates": [86.925, 27.988, 8848.0]}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .and(query_param("text", "Broken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{"geometry": {"coordinates": [12.5]}}]
            })))
            .mount(&server)
            .await;

        let geocoder = geocoder_for(&server);
        assert_eq!(
            geocoder.geocode("Everest").await?,
            Some(LatLon(27.988, 86.925))
        );
        assert_eq!(geocoder.geocode("Broken").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_geocode_server_error_is_distinct_from_no_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = geocoder_for(&server).geocode("Moscow").await;
        assert!(matches!(
            result,
            Err(GeocodeError::HttpStatus { status, .. }) if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn test_geocode_is_memoized_per_query() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{"geometry": {"coordinates": [2.35, 48.85]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = geocoder_for(&server);
        let first = geocoder.geocode("Paris").await?;
        let second = geocoder.geocode("Paris").await?;
        assert_eq!(first, second);
        assert_eq!(first, Some(LatLon(48.85, 2.35)));
        Ok(())
    }
}

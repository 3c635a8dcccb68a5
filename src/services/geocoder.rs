use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::coercion::to_number;
use crate::models::Coordinate;

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires an identifying User-Agent
pub const DEFAULT_USER_AGENT: &str = "la-restaurants/1.0 (contact@example.com)";

/// Errors that can occur when resolving an address
///
/// An address that simply has no match is not an error; see
/// [`GeocodingClient::resolve`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Address is required")]
    InvalidInput,

    #[error("Geocoding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoding failed ({status})")]
    Status { status: u16 },
}

/// Free-text address lookup against a Nominatim-compatible search endpoint
pub struct GeocodingClient {
    endpoint: String,
    client: Client,
}

impl GeocodingClient {
    /// Create a new geocoding client
    ///
    /// Every request carries `user_agent`; free geocoders block anonymous
    /// clients.
    pub fn new(
        endpoint: String,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { endpoint, client })
    }

    /// Resolve an address to the best-matching coordinate
    ///
    /// Issues exactly one request and takes the first candidate.
    /// Returns `Ok(None)` when the service has no usable match.
    pub async fn resolve(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::InvalidInput);
        }

        let url = format!(
            "{}?format=json&limit=1&q={}",
            self.endpoint,
            urlencoding::encode(address)
        );

        tracing::debug!("Geocoding address via {}", self.endpoint);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Geocoding failed with status {}", status);
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let candidates: Value = response.json().await?;

        Ok(first_candidate(&candidates))
    }
}

fn first_candidate(candidates: &Value) -> Option<Coordinate> {
    let place = candidates.as_array()?.first()?;
    let lat = place.get("lat").and_then(to_number)?;
    let lon = place.get("lon").and_then(to_number)?;
    Coordinate::new(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client(endpoint: &str) -> GeocodingClient {
        GeocodingClient::new(endpoint.to_string(), DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_first_candidate_parses_string_coordinates() {
        let body = json!([
            {"lat": "34.0522", "lon": "-118.2437", "display_name": "Los Angeles"},
            {"lat": "0", "lon": "0"}
        ]);
        let coordinate = first_candidate(&body).unwrap();
        assert_eq!(coordinate.latitude, 34.0522);
        assert_eq!(coordinate.longitude, -118.2437);
    }

    #[test]
    fn test_first_candidate_none_for_empty_or_malformed() {
        assert!(first_candidate(&json!([])).is_none());
        assert!(first_candidate(&json!({"lat": "1", "lon": "2"})).is_none());
        assert!(first_candidate(&json!([{"lat": "abc", "lon": "2"}])).is_none());
    }

    #[tokio::test]
    async fn test_blank_address_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&format!("{}/search", server.url()));
        let result = client.resolve("   ").await;

        assert!(matches!(result, Err(GeocodeError::InvalidInput)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_sends_user_agent_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("format".into(), "json".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "1".into()),
                mockito::Matcher::UrlEncoded("q".into(), "600 W 7th St, Los Angeles".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "34.0479", "lon": "-118.2587"}]"#)
            .create_async()
            .await;

        let client = test_client(&format!("{}/search", server.url()));
        let coordinate = client.resolve(" 600 W 7th St, Los Angeles ").await.unwrap();

        assert_eq!(coordinate, Coordinate::new(34.0479, -118.2587));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = test_client(&format!("{}/search", server.url()));
        let result = client.resolve("anywhere").await;

        assert!(matches!(result, Err(GeocodeError::Status { status: 503 })));
    }
}

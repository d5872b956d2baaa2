//! Kakao Local API client.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::GeocodingService;
use crate::config::KakaoConfig;
use crate::error::{FinderError, Result};
use crate::models::{Coordinate, RegionName};

const ADDRESS_SEARCH_PATH: &str = "/v2/local/search/address.json";
const COORD_TO_ADDRESS_PATH: &str = "/v2/local/geo/coord2address.json";

#[derive(Debug, Deserialize)]
struct Documents<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct AddressDocument {
    /// Longitude
    x: Degrees,
    /// Latitude
    y: Degrees,
}

/// Kakao sends decimal strings; plain JSON numbers are accepted as well
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CoordDocument {
    address: Option<RegionDescriptor>,
}

#[derive(Debug, Deserialize)]
struct RegionDescriptor {
    region_2depth_name: Option<String>,
    region_3depth_name: Option<String>,
}

/// Geocoder backed by `dapi.kakao.com`
#[derive(Clone)]
pub struct KakaoClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl KakaoClient {
    /// Fails with a configuration error when no key is configured; no request is made.
    pub fn new(config: &KakaoConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(FinderError::missing_api_key)?;

        let client = Client::builder()
            .user_agent(concat!("dongne/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FinderError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("KakaoAK {}", api_key),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(header::AUTHORIZATION, &self.auth_header)
            .query(query)
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Kakao {} failed with status {}: {}", path, status, body);
            return Err(FinderError::Upstream(format!(
                "Kakao API returned {} for {}",
                status, path
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            FinderError::Upstream(format!("Failed to parse Kakao response from {}: {}", path, e))
        })
    }
}

fn parse_degrees(field: &str, value: &Degrees) -> Result<f64> {
    let invalid = || FinderError::Upstream(format!("Invalid {} in Kakao response: {:?}", field, value));
    let degrees = match value {
        Degrees::Number(n) => *n,
        Degrees::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
    };
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(invalid())
    }
}

#[async_trait]
impl GeocodingService for KakaoClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>> {
        let data: Documents<AddressDocument> = self
            .get(ADDRESS_SEARCH_PATH, &[("query", address.to_string())])
            .await?;

        let Some(first) = data.documents.first() else {
            debug!("No geocoding candidates for {:?}", address);
            return Ok(None);
        };

        let coord = Coordinate::new(parse_degrees("x", &first.x)?, parse_degrees("y", &first.y)?);
        debug!(
            "Geocoded {:?} to {} ({} candidates)",
            address,
            coord,
            data.documents.len()
        );
        Ok(Some(coord))
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<RegionName>> {
        let data: Documents<CoordDocument> = self
            .get(
                COORD_TO_ADDRESS_PATH,
                &[("x", at.lon.to_string()), ("y", at.lat.to_string())],
            )
            .await?;

        let region = data
            .documents
            .into_iter()
            .next()
            .and_then(|doc| doc.address)
            .and_then(|addr| {
                RegionName::from_parts(
                    addr.region_2depth_name.as_deref(),
                    addr.region_3depth_name.as_deref(),
                )
            });

        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> KakaoConfig {
        KakaoConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let config = KakaoConfig::default();
        assert!(matches!(
            KakaoClient::new(&config),
            Err(FinderError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_geocode_takes_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ADDRESS_SEARCH_PATH))
            .and(query_param("query", "강남대로"))
            .and(header("Authorization", "KakaoAK test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    { "x": "127.0", "y": "37.5", "address_name": "first" },
                    { "x": "126.0", "y": "36.0", "address_name": "second" }
                ]
            })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        let coord = client.geocode("강남대로").await.unwrap().unwrap();
        assert_eq!(coord, Coordinate::new(127.0, 37.5));
    }

    #[tokio::test]
    async fn test_geocode_accepts_numeric_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ADDRESS_SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "documents": [{ "x": 127.0, "y": 37.5 }] })),
            )
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        let coord = client.geocode("강남대로").await.unwrap().unwrap();
        assert_eq!(coord, Coordinate::new(127.0, 37.5));
    }

    #[tokio::test]
    async fn test_geocode_no_documents_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ADDRESS_SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        assert!(client.geocode("zzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_geocode_bad_coordinate_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ADDRESS_SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "documents": [{ "x": "east", "y": "37.5" }] })),
            )
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        assert!(matches!(
            client.geocode("강남대로").await,
            Err(FinderError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        let err = client.geocode("강남대로").await.unwrap_err();
        assert!(matches!(err, FinderError::Upstream(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        assert!(matches!(
            client.reverse_geocode(Coordinate::new(127.0, 37.5)).await,
            Err(FinderError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_reverse_geocode_builds_region_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COORD_TO_ADDRESS_PATH))
            .and(query_param("x", "127"))
            .and(query_param("y", "37.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [{
                    "address": {
                        "region_1depth_name": "서울",
                        "region_2depth_name": "강남구",
                        "region_3depth_name": "역삼동"
                    },
                    "road_address": null
                }]
            })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        let region = client
            .reverse_geocode(Coordinate::new(127.0, 37.5))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(region.as_str(), "강남구 역삼동");
    }

    #[tokio::test]
    async fn test_reverse_geocode_skips_incomplete_region() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COORD_TO_ADDRESS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [{
                    "address": { "region_2depth_name": "강남구", "region_3depth_name": "" }
                }]
            })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        assert!(client
            .reverse_geocode(Coordinate::new(127.0, 37.5))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_reverse_geocode_without_address_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COORD_TO_ADDRESS_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "documents": [{ "address": null }] })),
            )
            .mount(&server)
            .await;

        let client = KakaoClient::new(&config_for(&server)).unwrap();
        assert!(client
            .reverse_geocode(Coordinate::new(124.0, 33.0))
            .await
            .unwrap()
            .is_none());
    }
}

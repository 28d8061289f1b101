/// Google Maps Platform provider
///
/// One client covers every location concern of the pipeline:
/// 1. Geocoding: /geocode/json (forward by `address`, reverse by `latlng`)
/// 2. Nearby Search: /place/nearbysearch/json
/// 3. Place Details: /place/details/json
/// 4. Distance Matrix: /distancematrix/json
///
/// Google reports most failures inside a 200 response via the `status` field, so
/// every call checks both the HTTP status and the payload status.
use crate::{
    error::{AppError, AppResult},
    models::{
        google::{
            DistanceMatrixResponse, GeocodeResponse, NearbySearchResponse, PlaceDetailsResponse,
            STATUS_OK, STATUS_ZERO_RESULTS,
        },
        Origin, PlaceCandidate, PlaceDetails, TravelEstimate,
    },
    services::providers::{
        DistanceProvider, GeocodingProvider, PlaceDetailsProvider, PlacesSearchProvider,
    },
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DETAILS_FIELDS: &str =
    "name,rating,user_ratings_total,reviews,formatted_address,url,photos,price_level,opening_hours,types";
const PHOTO_MAX_WIDTH: u32 = 400;
const TRAVEL_MODE: &str = "driving";
/// Nearby Search rejects larger radii
pub const MAX_SEARCH_RADIUS_METERS: u32 = 50_000;

/// `ZERO_RESULTS` is a normal empty answer, not a failure
fn is_usable_status(status: &str) -> bool {
    status == STATUS_OK || status == STATUS_ZERO_RESULTS
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{api_url}{path}` with the API key appended and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Google Maps API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    fn status_error(endpoint: &str, status: &str, message: Option<String>) -> AppError {
        AppError::ExternalApi(format!(
            "Google {} returned {}: {}",
            endpoint,
            status,
            message.unwrap_or_default()
        ))
    }

    async fn geocode_with(&self, params: &[(&str, &str)]) -> AppResult<GeocodeResponse> {
        let response: GeocodeResponse = self.get_json("/geocode/json", params).await?;
        if !is_usable_status(&response.status) {
            return Err(Self::status_error(
                "geocoding",
                &response.status,
                response.error_message,
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl GeocodingProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> AppResult<Option<Origin>> {
        let response = self.geocode_with(&[("address", address)]).await?;

        let origin = response.results.first().map(|result| {
            let location = result.geometry.location;
            Origin::from_coordinates(location.lat, location.lng)
        });

        tracing::debug!(
            address = %address,
            found = origin.is_some(),
            provider = "google",
            "Geocoding completed"
        );

        Ok(origin)
    }

    async fn reverse_geocode(&self, origin: &Origin) -> AppResult<Option<String>> {
        let response = self.geocode_with(&[("latlng", origin.as_str())]).await?;
        Ok(response
            .results
            .into_iter()
            .find_map(|result| result.formatted_address))
    }
}

#[async_trait::async_trait]
impl PlacesSearchProvider for GoogleMapsClient {
    async fn search_nearby(
        &self,
        origin: &Origin,
        radius_meters: u32,
        category: &str,
        open_now: bool,
    ) -> AppResult<Vec<PlaceCandidate>> {
        let radius = radius_meters.min(MAX_SEARCH_RADIUS_METERS).to_string();
        let mut params = vec![
            ("location", origin.as_str()),
            ("radius", radius.as_str()),
            ("type", category),
        ];
        if open_now {
            params.push(("opennow", "true"));
        }

        let response: NearbySearchResponse =
            self.get_json("/place/nearbysearch/json", &params).await?;

        if !is_usable_status(&response.status) {
            return Err(Self::status_error(
                "nearby search",
                &response.status,
                response.error_message,
            ));
        }

        let candidates: Vec<PlaceCandidate> = response
            .results
            .into_iter()
            .map(PlaceCandidate::from)
            .collect();

        tracing::debug!(
            category = %category,
            radius_meters = radius_meters,
            results = candidates.len(),
            provider = "google",
            "Nearby search completed"
        );

        Ok(candidates)
    }
}

#[async_trait::async_trait]
impl PlaceDetailsProvider for GoogleMapsClient {
    async fn fetch_details(&self, place_id: &str) -> AppResult<PlaceDetails> {
        let response: PlaceDetailsResponse = self
            .get_json(
                "/place/details/json",
                &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(Self::status_error(
                "place details",
                &response.status,
                response.error_message,
            ));
        }

        response
            .result
            .map(PlaceDetails::from)
            .ok_or_else(|| AppError::NotFound(format!("No details for place {}", place_id)))
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}/place/photo?maxwidth={}&photoreference={}&key={}",
            self.api_url, PHOTO_MAX_WIDTH, photo_reference, self.api_key
        )
    }
}

#[async_trait::async_trait]
impl DistanceProvider for GoogleMapsClient {
    async fn estimate(
        &self,
        origin: &Origin,
        destination: &str,
    ) -> AppResult<Option<TravelEstimate>> {
        let response: DistanceMatrixResponse = self
            .get_json(
                "/distancematrix/json",
                &[
                    ("origins", origin.as_str()),
                    ("destinations", destination),
                    ("mode", TRAVEL_MODE),
                ],
            )
            .await?;

        Ok(response.into_estimate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GoogleMapsClient {
        GoogleMapsClient::new(
            "test_key".to_string(),
            base_url.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_geocode_returns_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "Avenida Paulista"))
            .and(query_param("key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    {"formatted_address": "Av. Paulista", "geometry": {"location": {"lat": -23.56, "lng": -46.65}}},
                    {"formatted_address": "Other", "geometry": {"location": {"lat": 1.0, "lng": 2.0}}}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let origin = client.geocode("Avenida Paulista").await.unwrap();
        assert_eq!(origin, Some(Origin::new("-23.56,-46.65")));
    }

    #[tokio::test]
    async fn test_geocode_zero_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.geocode("nowhere at all").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_request_denied_is_error() {
        let server = MockServer::start().await;
        Mock::given(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .search_nearby(&Origin::new("0,0"), 1000, "park", false)
            .await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_search_nearby_sends_radius_type_and_open_now() {
        let server = MockServer::start().await;
        Mock::given(path("/place/nearbysearch/json"))
            .and(query_param("location", "-23.5,-46.6"))
            .and(query_param("radius", "20000"))
            .and(query_param("type", "gym"))
            .and(query_param("opennow", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [{"place_id": "g1", "name": "Academia", "rating": 4.9, "user_ratings_total": 300, "types": ["gym"]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let results = client
            .search_nearby(&Origin::new("-23.5,-46.6"), 20000, "gym", true)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "g1");
    }

    #[tokio::test]
    async fn test_search_nearby_caps_radius() {
        let server = MockServer::start().await;
        Mock::given(path("/place/nearbysearch/json"))
            .and(query_param("radius", "50000"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let results = client
            .search_nearby(&Origin::new("0,0"), 120_000, "park", false)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(path("/place/details/json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.fetch_details("p1").await.is_err());
    }

    #[tokio::test]
    async fn test_distance_matrix_estimate() {
        let server = MockServer::start().await;
        Mock::given(path("/distancematrix/json"))
            .and(query_param("mode", "driving"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "rows": [{"elements": [{"status": "OK", "distance": {"text": "3 km"}, "duration": {"text": "9 min"}}]}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let estimate = client
            .estimate(&Origin::new("0,0"), "Rua A, 1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(estimate.distance_text, "3 km");
        assert_eq!(estimate.duration_text, "9 min");
    }

    #[test]
    fn test_photo_url() {
        let client = test_client("http://maps.test/");
        assert_eq!(
            client.photo_url("ref123"),
            "http://maps.test/place/photo?maxwidth=400&photoreference=ref123&key=test_key"
        );
    }
}

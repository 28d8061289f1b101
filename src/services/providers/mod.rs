/// External provider abstraction
///
/// The recommendation pipeline only talks to these traits. Concrete clients for
/// Google Maps Platform and OpenAI-compatible chat APIs live in the submodules;
/// tests swap in mocks.
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::AppResult,
    models::{Origin, PlaceCandidate, PlaceDetails, TravelEstimate},
};

pub mod google;
pub mod openai;

pub use google::GoogleMapsClient;
pub use openai::OpenAiClassifier;

/// Turns free-text addresses into coordinates and back
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Coordinates of the first match for `address`, `None` when nothing matched
    async fn geocode(&self, address: &str) -> AppResult<Option<Origin>>;

    /// Formatted address of the first match for `origin`, `None` when nothing matched
    async fn reverse_geocode(&self, origin: &Origin) -> AppResult<Option<String>>;
}

/// Proximity search for one place category
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlacesSearchProvider: Send + Sync {
    async fn search_nearby(
        &self,
        origin: &Origin,
        radius_meters: u32,
        category: &str,
        open_now: bool,
    ) -> AppResult<Vec<PlaceCandidate>>;
}

/// Full record lookup for a single place
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaceDetailsProvider: Send + Sync {
    async fn fetch_details(&self, place_id: &str) -> AppResult<PlaceDetails>;

    /// Public image URL for a photo reference returned in [`PlaceDetails`]
    fn photo_url(&self, photo_reference: &str) -> String;
}

/// Origin-to-destination travel estimate
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DistanceProvider: Send + Sync {
    /// `None` when the provider has no route for the pair
    async fn estimate(&self, origin: &Origin, destination: &str)
        -> AppResult<Option<TravelEstimate>>;
}

/// Single text-in/text-out language model exchange
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LanguageModelClassifier: Send + Sync {
    async fn classify(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Collaborators used by one pipeline run
#[derive(Clone)]
pub struct Providers {
    pub geocoding: Arc<dyn GeocodingProvider>,
    pub places: Arc<dyn PlacesSearchProvider>,
    pub details: Arc<dyn PlaceDetailsProvider>,
    pub distance: Arc<dyn DistanceProvider>,
    pub classifier: Arc<dyn LanguageModelClassifier>,
}

impl Providers {
    /// Google Maps for every location concern, OpenAI for classification
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let google = Arc::new(GoogleMapsClient::new(
            config.google_api_key.clone(),
            config.google_api_url.clone(),
            timeout,
        )?);
        let classifier = Arc::new(OpenAiClassifier::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            timeout,
        )?);

        Ok(Self {
            geocoding: google.clone(),
            places: google.clone(),
            details: google.clone(),
            distance: google,
            classifier,
        })
    }
}

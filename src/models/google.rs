//! Raw Google Maps Platform response types
//!
//! Every endpoint wraps its payload with a `status` string; callers check it
//! before trusting `results`.

use serde::Deserialize;

use super::{PlaceCandidate, PlaceDetails, TravelEstimate};

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

// ============================================================================
// Geocoding API
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// ============================================================================
// Places API
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl From<NearbyPlace> for PlaceCandidate {
    fn from(place: NearbyPlace) -> Self {
        PlaceCandidate {
            id: place.place_id,
            name: place.name,
            rating: place.rating,
            review_count: place.user_ratings_total,
            category_codes: place.types,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<GooglePlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlaceDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<GoogleReview>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub photos: Vec<GooglePhoto>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleReview {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GooglePhoto {
    pub photo_reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

impl From<GooglePlaceDetails> for PlaceDetails {
    fn from(details: GooglePlaceDetails) -> Self {
        PlaceDetails {
            name: details.name,
            address: details.formatted_address,
            rating: details.rating,
            review_count: details.user_ratings_total,
            review_excerpts: details.reviews.into_iter().map(|r| r.text).collect(),
            link: details.url,
            photo_reference: details.photos.into_iter().next().map(|p| p.photo_reference),
            price_level: details.price_level,
            opening_hours: details
                .opening_hours
                .map(|hours| hours.weekday_text)
                .unwrap_or_default(),
            category_codes: details.types,
        }
    }
}

// ============================================================================
// Distance Matrix API
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
}

impl DistanceMatrixResponse {
    /// Estimate for the single origin/destination pair, if the provider produced one
    pub fn into_estimate(self) -> Option<TravelEstimate> {
        if self.status != STATUS_OK {
            return None;
        }
        let element = self.rows.into_iter().next()?.elements.into_iter().next()?;
        if element.status != STATUS_OK {
            return None;
        }
        Some(TravelEstimate {
            distance_text: element.distance?.text,
            duration_text: element.duration?.text,
        })
    }
}

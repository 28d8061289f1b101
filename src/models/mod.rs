use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod google;
pub mod preferences;

pub use preferences::{ActivityType, BudgetBand, Preferences};

/// Point every provider search is centered on
///
/// Kept in the `"lat,lng"` form the places and distance providers accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_coordinates(lat: f64, lng: f64) -> Self {
        Self(format!("{},{}", lat, lng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Place returned by a proximity search, before enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub category_codes: Vec<String>,
}

/// Full record returned by the place details provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetails {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub review_excerpts: Vec<String>,
    pub link: Option<String>,
    pub photo_reference: Option<String>,
    pub price_level: Option<u8>,
    pub opening_hours: Vec<String>,
    pub category_codes: Vec<String>,
}

/// Origin-to-venue travel estimate as display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelEstimate {
    pub distance_text: String,
    pub duration_text: String,
}

/// Candidate with details, travel estimate and display price attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlace {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Up to five review excerpts joined with `" | "`
    pub comments: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub distance: String,
    pub travel_time: String,
    /// True when distance and travel time are a synthetic approximation
    /// rather than a distance provider measurement
    pub distance_estimated: bool,
    pub price_level: Option<u8>,
    pub estimated_cost: String,
    pub category_codes: Vec<String>,
    /// Display labels for `category_codes`
    pub categories: Vec<String>,
    pub opening_hours: Vec<String>,
}

/// Classification label assigned by the language model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLabel {
    Ideal,
    Acceptable,
    NotIdeal,
    Unrecognized,
}

impl VerdictLabel {
    pub fn is_approved(&self) -> bool {
        matches!(self, VerdictLabel::Ideal | VerdictLabel::Acceptable)
    }
}

/// Classifier decision for the candidate at `position` (0-based) in the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub position: usize,
    pub label: VerdictLabel,
    pub justification: String,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        self.label.is_approved()
    }
}

/// Final output unit returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub place: EnrichedPlace,
    pub justification: String,
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    /// The strict candidate search found nothing and the relaxed search was used
    pub degraded: bool,
    /// Too few places passed quality/budget filtering, so all enriched places were classified
    pub relaxed_filters: bool,
}

/// Request body for the geolocation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reverse-geocoded current position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationResponse {
    pub coordinates: Origin,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_from_coordinates() {
        let origin = Origin::from_coordinates(-23.5505, -46.6333);
        assert_eq!(origin.as_str(), "-23.5505,-46.6333");
        assert_eq!(format!("{}", origin), "-23.5505,-46.6333");
    }

    #[test]
    fn test_origin_serializes_as_plain_string() {
        let json = serde_json::to_string(&Origin::new("1,2")).unwrap();
        assert_eq!(json, r#""1,2""#);
    }

    #[test]
    fn test_verdict_label_approval() {
        assert!(VerdictLabel::Ideal.is_approved());
        assert!(VerdictLabel::Acceptable.is_approved());
        assert!(!VerdictLabel::NotIdeal.is_approved());
        assert!(!VerdictLabel::Unrecognized.is_approved());
    }

    #[test]
    fn test_recommendation_flattens_place_fields() {
        let recommendation = Recommendation {
            place: EnrichedPlace {
                id: "abc".to_string(),
                name: "Parque Ibirapuera".to_string(),
                address: "Av. Pedro Álvares Cabral".to_string(),
                rating: Some(4.8),
                review_count: Some(120_000),
                comments: "Lindo".to_string(),
                link: None,
                image_url: None,
                distance: "3 km".to_string(),
                travel_time: "12 min".to_string(),
                distance_estimated: false,
                price_level: Some(0),
                estimated_cost: "R$0".to_string(),
                category_codes: vec!["park".to_string()],
                categories: vec!["Parque".to_string()],
                opening_hours: vec![],
            },
            justification: "Ótimo para famílias".to_string(),
        };

        let value = serde_json::to_value(&recommendation).unwrap();
        assert_eq!(value["name"], "Parque Ibirapuera");
        assert_eq!(value["estimated_cost"], "R$0");
        assert_eq!(value["justification"], "Ótimo para famílias");
    }
}

use crate::{
    error::AppResult,
    models::{GeolocationResponse, Origin},
    services::providers::GeocodingProvider,
};

/// Address shown when reverse geocoding finds nothing for the user's position
pub const CURRENT_LOCATION_LABEL: &str = "Localização atual";

const COORDINATE_SEPARATOR: char = ',';

/// Resolves the search origin for a request
///
/// Never fails: blank input, geocoding misses and geocoding errors all fall back
/// to `default_origin`. Input that already looks like a `lat,lng` pair is used as-is.
pub async fn resolve_origin(
    geocoding: &dyn GeocodingProvider,
    location: Option<&str>,
    default_origin: &Origin,
) -> Origin {
    let location = match location.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::info!(origin = %default_origin, "No location provided, using default origin");
            return default_origin.clone();
        }
    };

    if location.contains(COORDINATE_SEPARATOR) {
        return Origin::new(location);
    }

    match geocoding.geocode(location).await {
        Ok(Some(origin)) => {
            tracing::info!(location = %location, origin = %origin, "Location geocoded");
            origin
        }
        Ok(None) => {
            tracing::warn!(location = %location, "Address not found, using default origin");
            default_origin.clone()
        }
        Err(e) => {
            tracing::warn!(
                location = %location,
                error = %e,
                "Geocoding failed, using default origin"
            );
            default_origin.clone()
        }
    }
}

/// Reverse-geocodes the user's current position
///
/// Unlike [`resolve_origin`] this is a plain pass-through: provider errors reach the caller.
pub async fn resolve_current_location(
    geocoding: &dyn GeocodingProvider,
    latitude: f64,
    longitude: f64,
) -> AppResult<GeolocationResponse> {
    let coordinates = Origin::from_coordinates(latitude, longitude);
    let address = geocoding
        .reverse_geocode(&coordinates)
        .await?
        .unwrap_or_else(|| CURRENT_LOCATION_LABEL.to_string());

    Ok(GeolocationResponse {
        coordinates,
        address,
    })
}

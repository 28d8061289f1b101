use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{GeolocationRequest, GeolocationResponse},
    routes::AppState,
    services::location,
};

/// Reverse-geocodes the caller's current position
pub async fn locate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GeolocationRequest>,
) -> AppResult<Json<GeolocationResponse>> {
    if !(-90.0..=90.0).contains(&request.latitude) || !(-180.0..=180.0).contains(&request.longitude)
    {
        return Err(AppError::InvalidInput(
            "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
        ));
    }

    tracing::info!(request_id = %request_id, "Resolving current location");

    let response = location::resolve_current_location(
        state.providers.geocoding.as_ref(),
        request.latitude,
        request.longitude,
    )
    .await?;

    Ok(Json(response))
}

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{Preferences, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(preferences): Json<Preferences>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        activity = %preferences.activity_type,
        budget = %preferences.budget,
        travel_time_minutes = preferences.travel_time_minutes,
        has_location = preferences.location.is_some(),
        "Processing recommendation request"
    );

    let response =
        recommendations::get_recommendations(&state.providers, &state.default_origin, preferences)
            .await
            .inspect_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "Recommendation pipeline failed")
            })?;

    tracing::info!(
        request_id = %request_id,
        recommendations = response.recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}

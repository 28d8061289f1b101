use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    error::AppResult,
    middleware::{make_span_with_request_id, request_id_middleware},
    models::Origin,
    services::providers::Providers,
};

pub mod diagnostics;
pub mod geolocation;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub providers: Providers,
    /// Search origin for requests without a usable location
    pub default_origin: Origin,
}

impl AppState {
    pub fn new(providers: Providers, default_origin: Origin) -> Self {
        Self {
            providers,
            default_origin,
        }
    }

    /// Real provider clients built from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            Providers::from_config(config)?,
            Origin::new(config.default_origin.clone()),
        ))
    }
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/geolocation", post(geolocation::locate))
        .route("/diagnostics", get(diagnostics::diagnose))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

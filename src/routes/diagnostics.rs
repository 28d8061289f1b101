use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    middleware::RequestId,
    routes::AppState,
    services::diagnostics::{self, DiagnosticsReport},
};

/// Provider smoke test; always answers 200 with per-provider results
pub async fn diagnose(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> Json<DiagnosticsReport> {
    tracing::info!(request_id = %request_id, "Running provider diagnostics");

    Json(diagnostics::run_diagnostics(&state.providers, &state.default_origin).await)
}

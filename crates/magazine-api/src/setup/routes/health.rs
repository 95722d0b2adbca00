//! Root and health check handlers.

use crate::constants::API_UP_MESSAGE;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
}

/// Root endpoint - API is up.
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "data": API_UP_MESSAGE })),
    )
}

/// Liveness plus the configured storage backend.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy".to_string(),
            storage: state.storage.backend_type().to_string(),
        }),
    )
}

//! Health check endpoints for Kubernetes-style liveness and readiness checks.
//!
//! - `/livez` - Liveness (immediate 200, no checks)
//! - `/readyz` - Readiness (store round trip)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /livez - Liveness check.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness check.
///
/// Returns 200 when the store answers, 503 otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "healthy": true }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "healthy": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

//! Liveness and readiness checks.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// 200 while the note store answers a ping, 503 otherwise.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.notes.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "ok" }))),
        Err(e) => {
            tracing::warn!(error = %e, "note store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}

/// GET /health and GET /ready.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

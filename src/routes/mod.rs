//! Router assembly: health/readiness plus note CRUD, with tracing and a body size limit.

mod common;
mod notes;

pub use common::health_routes;
pub use notes::note_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health_routes(state.clone()))
        .merge(note_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}

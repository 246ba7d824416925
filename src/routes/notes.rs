//! Note CRUD routes.

use crate::handlers::notes::{create, delete as delete_handler, list, patch, read, replace};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn note_routes(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(list).post(create))
        .route(
            "/notes/:id",
            get(read).put(replace).patch(patch).delete(delete_handler),
        )
        .with_state(state)
}

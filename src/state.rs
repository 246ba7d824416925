//! Shared application state for all routes. Built once at startup and injected into the router.

use crate::service::NoteService;
use crate::store::NoteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        AppState {
            notes: NoteService::new(store),
        }
    }
}

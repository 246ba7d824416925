//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::error_body;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret '{name}' not retrievable: {source}")]
    Fetch {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("secret '{0}' not found")]
    NotFound(String),
    #[error("secret '{0}' has no string value")]
    Empty(String),
}

/// Startup failures. Both kinds abort the process before the listener binds.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("secret retrieval: {0}")]
    SecretRetrieval(#[from] SecretError),
    #[error("connection: {0}")]
    Connection(#[source] mongodb::error::Error),
    #[error("store: {0}")]
    Store(#[source] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] mongodb::error::Error),
    #[error("unexpected inserted id: {0}")]
    InsertedId(mongodb::bson::Bson),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    /// `message` is what the client sees; the cause is logged only.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn note_not_found() -> Self {
        AppError::NotFound("Note not found")
    }

    /// Adapter for `map_err` that tags a store failure with the client-facing message.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, (*m).to_string()),
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_string())
            }
        };
        (status, Json(error_body(message))).into_response()
    }
}

//! Response helpers. Bodies are bare JSON documents; failures carry a single `error` string.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn message(message: &'static str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message }))
}

pub fn error_body(message: String) -> ErrorBody {
    ErrorBody { error: message }
}

/// Untyped form of [`ErrorBody`], handy for fallbacks and tests.
pub fn error_value(message: &str) -> Value {
    serde_json::json!({ "error": message })
}

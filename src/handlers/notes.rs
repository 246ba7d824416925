//! Note CRUD handlers: list, read, create, replace, patch, delete.

use crate::document::filter_from_query;
use crate::error::AppError;
use crate::extractors::NoteId;
use crate::response::{created, message, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(_) => Err(AppError::BadRequest("body must be a JSON object".into())),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let notes = state
        .notes
        .list(filter_from_query(params))
        .await
        .map_err(AppError::store("Failed to fetch notes"))?;
    Ok(ok(notes))
}

pub async fn read(
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> Result<impl IntoResponse, AppError> {
    let note = state
        .notes
        .get(id)
        .await
        .map_err(AppError::store("Failed to fetch the note"))?
        .ok_or_else(AppError::note_not_found)?;
    Ok(ok(note))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let note = state
        .notes
        .create(&body)
        .await
        .map_err(AppError::store("Failed to create a note"))?;
    tracing::debug!(id = %note["_id"], "note created");
    Ok(created(note))
}

pub async fn replace(
    State(state): State<AppState>,
    NoteId(id): NoteId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let note = state
        .notes
        .replace(id, &body)
        .await
        .map_err(AppError::store("Failed to update the note"))?
        .ok_or_else(AppError::note_not_found)?;
    Ok(ok(note))
}

pub async fn patch(
    State(state): State<AppState>,
    NoteId(id): NoteId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let note = state
        .notes
        .patch(id, body)
        .await
        .map_err(AppError::store("Failed to update the note"))?
        .ok_or_else(AppError::note_not_found)?;
    Ok(ok(note))
}

pub async fn delete(
    State(state): State<AppState>,
    NoteId(id): NoteId,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .notes
        .delete(id)
        .await
        .map_err(AppError::store("Failed to delete the note"))?;
    if !deleted {
        return Err(AppError::note_not_found());
    }
    tracing::debug!(id = %id, "note deleted");
    Ok(message("Note deleted successfully"))
}

//! Extract and parse the `:id` path segment as an ObjectId.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

use crate::error::AppError;

/// A well-formed note identifier. Malformed ids are rejected with 400 before any store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteId(pub ObjectId);

impl std::str::FromStr for NoteId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s.trim())
            .map(NoteId)
            .map_err(|_| AppError::BadRequest(format!("invalid note id: {}", s)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_ids() {
        let id = ObjectId::new();
        let parsed: NoteId = id.to_hex().parse().unwrap();
        assert_eq!(parsed, NoteId(id));
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "0123456789abcdef012345678"] {
            assert!(matches!(raw.parse::<NoteId>(), Err(AppError::BadRequest(_))), "{raw}");
        }
    }
}

//! Note operations: one store call each (create re-reads), timestamps stamped here.

use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::document::{from_json_object, json_to_bson, to_json};
use crate::error::StoreError;
use crate::store::NoteStore;

pub const FIELD_ID: &str = "_id";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Caller fields a partial update never writes: the identifier and the creation stamp.
const IMMUTABLE_FIELDS: &[&str] = &[FIELD_ID, FIELD_CREATED_AT];

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

fn now() -> DateTime {
    DateTime::from_millis(Utc::now().timestamp_millis())
}

/// `title`/`content` taken from a request body; absent fields are stored as null.
fn pinned_fields(body: &Map<String, Value>) -> (Bson, Bson) {
    let field = |name: &str| body.get(name).cloned().map(json_to_bson).unwrap_or(Bson::Null);
    (field(FIELD_TITLE), field(FIELD_CONTENT))
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        NoteService { store }
    }

    pub async fn list(&self, filter: Document) -> Result<Vec<Value>, StoreError> {
        let docs = self.store.find(filter).await?;
        Ok(docs.into_iter().map(to_json).collect())
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<Value>, StoreError> {
        Ok(self.store.find_by_id(id).await?.map(to_json))
    }

    /// Inserts a new note with `createdAt == updatedAt` and returns it as stored.
    pub async fn create(&self, body: &Map<String, Value>) -> Result<Value, StoreError> {
        let (title, content) = pinned_fields(body);
        let stamp = now();
        let new_note = doc! {
            "title": title,
            "content": content,
            "createdAt": stamp,
            "updatedAt": stamp,
        };
        let id = self.store.insert(new_note.clone()).await?;
        match self.store.find_by_id(id).await? {
            Some(stored) => Ok(to_json(stored)),
            // Deleted between insert and re-read; report what was written.
            None => {
                let mut written = doc! { "_id": id };
                for (k, v) in new_note {
                    written.insert(k, v);
                }
                Ok(to_json(written))
            }
        }
    }

    /// Overwrites `title` and `content` (null when absent) and refreshes `updatedAt`.
    pub async fn replace(
        &self,
        id: ObjectId,
        body: &Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let (title, content) = pinned_fields(body);
        let set = doc! {
            "title": title,
            "content": content,
            "updatedAt": now(),
        };
        Ok(self.store.update_by_id(id, set).await?.map(to_json))
    }

    /// Merges every caller field except the immutable ones, then refreshes `updatedAt`.
    pub async fn patch(
        &self,
        id: ObjectId,
        mut body: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        for field in IMMUTABLE_FIELDS {
            body.remove(*field);
        }
        let mut set = from_json_object(body);
        set.insert(FIELD_UPDATED_AT, now());
        Ok(self.store.update_by_id(id, set).await?.map(to_json))
    }

    pub async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        self.store.delete_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNoteStore;
    use std::time::Duration;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn service() -> NoteService {
        NoteService::new(Arc::new(MemoryNoteStore::new()))
    }

    fn id_of(note: &Value) -> ObjectId {
        ObjectId::parse_str(note[FIELD_ID].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn create_stamps_equal_timestamps() {
        let svc = service();
        let note = svc
            .create(&object(serde_json::json!({"title": "A", "content": "B"})))
            .await
            .unwrap();
        assert_eq!(note["title"], "A");
        assert_eq!(note["content"], "B");
        assert!(note[FIELD_CREATED_AT].is_string());
        assert_eq!(note[FIELD_CREATED_AT], note[FIELD_UPDATED_AT]);

        let fetched = svc.get(id_of(&note)).await.unwrap().unwrap();
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn create_stores_missing_fields_as_null_and_ignores_extras() {
        let svc = service();
        let note = svc
            .create(&object(serde_json::json!({"title": "only", "tag": "x"})))
            .await
            .unwrap();
        assert_eq!(note["content"], Value::Null);
        assert!(note.get("tag").is_none());
    }

    #[tokio::test]
    async fn replace_pins_fields_and_advances_updated_at() {
        let svc = service();
        let note = svc
            .create(&object(serde_json::json!({"title": "A", "content": "B"})))
            .await
            .unwrap();
        let id = id_of(&note);
        tokio::time::sleep(Duration::from_millis(5)).await;

        let after = svc
            .replace(id, &object(serde_json::json!({"title": "C", "tag": "x"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after["title"], "C");
        assert_eq!(after["content"], Value::Null);
        assert!(after.get("tag").is_none());
        assert_eq!(after[FIELD_ID], note[FIELD_ID]);
        assert_eq!(after[FIELD_CREATED_AT], note[FIELD_CREATED_AT]);
        assert!(after[FIELD_UPDATED_AT].as_str() > note[FIELD_UPDATED_AT].as_str());
    }

    #[tokio::test]
    async fn patch_merges_but_keeps_identity() {
        let svc = service();
        let note = svc
            .create(&object(serde_json::json!({"title": "A", "content": "B"})))
            .await
            .unwrap();
        let id = id_of(&note);
        tokio::time::sleep(Duration::from_millis(5)).await;

        let other = ObjectId::new().to_hex();
        let after = svc
            .patch(
                id,
                object(serde_json::json!({
                    "tag": "x",
                    "_id": other,
                    "createdAt": "1970-01-01T00:00:00.000Z",
                })),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after["tag"], "x");
        assert_eq!(after["title"], "A");
        assert_eq!(after["content"], "B");
        assert_eq!(after[FIELD_ID], note[FIELD_ID]);
        assert_eq!(after[FIELD_CREATED_AT], note[FIELD_CREATED_AT]);
        assert!(after[FIELD_UPDATED_AT].as_str() > note[FIELD_UPDATED_AT].as_str());
    }

    #[tokio::test]
    async fn missing_ids_yield_none() {
        let svc = service();
        let id = ObjectId::new();
        assert!(svc.get(id).await.unwrap().is_none());
        assert!(svc.replace(id, &Map::new()).await.unwrap().is_none());
        assert!(svc.patch(id, Map::new()).await.unwrap().is_none());
        assert!(!svc.delete(id).await.unwrap());
    }
}

//! In-memory note store for tests and local development.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::store::traits::{NoteStore, StoreResult};

/// Keeps documents in insertion order. Filters are top-level equality matches,
/// the same subset the HTTP layer produces from query strings.
#[derive(Default)]
pub struct MemoryNoteStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    matches!(doc.get("_id"), Some(Bson::ObjectId(oid)) if oid == id)
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().filter(|d| matches_filter(d, &filter)).cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Document>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| has_id(d, &id)).cloned())
    }

    async fn insert(&self, mut doc: Document) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        // _id leads the document, as the real store lays it out
        let mut stored = Document::new();
        stored.insert("_id", id);
        doc.remove("_id");
        for (k, v) in doc {
            stored.insert(k, v);
        }
        self.docs.write().await.push(stored);
        Ok(id)
    }

    async fn update_by_id(&self, id: ObjectId, set: Document) -> StoreResult<Option<Document>> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.iter_mut().find(|d| has_id(d, &id)) else {
            return Ok(None);
        };
        for (k, v) in set {
            doc.insert(k, v);
        }
        Ok(Some(doc.clone()))
    }

    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<bool> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| !has_id(d, &id));
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let store = MemoryNoteStore::new();
        let a = store.insert(doc! { "title": "A" }).await.unwrap();
        let b = store.insert(doc! { "title": "B" }).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);

        let found = store.find_by_id(a).await.unwrap().unwrap();
        assert_eq!(found.get_object_id("_id").unwrap(), a);
        assert_eq!(found.get_str("title").unwrap(), "A");
    }

    #[tokio::test]
    async fn find_filters_by_equality() {
        let store = MemoryNoteStore::new();
        store.insert(doc! { "title": "A", "content": "x" }).await.unwrap();
        store.insert(doc! { "title": "B", "content": "x" }).await.unwrap();

        assert_eq!(store.find(doc! {}).await.unwrap().len(), 2);
        assert_eq!(store.find(doc! { "content": "x" }).await.unwrap().len(), 2);
        let only_b = store.find(doc! { "title": "B" }).await.unwrap();
        assert_eq!(only_b.len(), 1);
        assert!(store.find(doc! { "title": "Z" }).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_returns_post_image() {
        let store = MemoryNoteStore::new();
        let id = store.insert(doc! { "title": "A", "content": "B" }).await.unwrap();

        let after = store
            .update_by_id(id, doc! { "title": "C", "tag": "x" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.get_str("title").unwrap(), "C");
        assert_eq!(after.get_str("content").unwrap(), "B");
        assert_eq!(after.get_str("tag").unwrap(), "x");

        assert!(store.update_by_id(ObjectId::new(), doc! { "title": "D" }).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = MemoryNoteStore::new();
        let id = store.insert(doc! { "title": "A" }).await.unwrap();
        assert!(store.delete_by_id(id).await.unwrap());
        assert!(!store.delete_by_id(id).await.unwrap());
        assert!(store.is_empty().await);
    }
}

//! NoteStore trait definition

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-level operations on the notes collection.
///
/// Implementations must be safe to share across concurrent requests; each call is a
/// single store operation and is attempted exactly once.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All documents whose fields equal every entry of `filter`.
    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>>;

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Document>>;

    /// Inserts `doc` and returns the store-generated identifier.
    async fn insert(&self, doc: Document) -> StoreResult<ObjectId>;

    /// Applies `set` as a field-level merge and returns the post-update document,
    /// or `None` when no document has that id.
    async fn update_by_id(&self, id: ObjectId, set: Document) -> StoreResult<Option<Document>>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<bool>;

    /// Round-trip to the backing store, used by readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}

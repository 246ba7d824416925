//! MongoDB-backed note store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::ReturnDocument,
    Client, Collection,
};

use crate::error::StoreError;
use crate::store::traits::{NoteStore, StoreResult};

/// Handle to one collection on a long-lived client. Cloning shares the client's pool.
#[derive(Clone)]
pub struct MongoNoteStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoNoteStore {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        MongoNoteStore { client, collection }
    }
}

#[async_trait]
impl NoteStore for MongoNoteStore {
    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Document>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, doc: Document) -> StoreResult<ObjectId> {
        let result = self.collection.insert_one(doc).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(StoreError::InsertedId(other)),
        }
    }

    async fn update_by_id(&self, id: ObjectId, set: Document) -> StoreResult<Option<Document>> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

//! Startup sequence: resolve the connection URI, open the collection, verify it.
//! Any failure here is fatal; the listener is never bound without a working store.

use mongodb::Client;

use crate::error::BootstrapError;
use crate::secrets::SecretSource;
use crate::store::{MongoNoteStore, NoteStore};

/// Fetches the connection URI stored under `secret_name`.
pub async fn resolve_connection_uri(
    secrets: &dyn SecretSource,
    secret_name: &str,
) -> Result<String, BootstrapError> {
    match secrets.fetch_secret(secret_name).await {
        Ok(uri) => {
            tracing::debug!(secret = %secret_name, "resolved connection uri");
            Ok(uri)
        }
        Err(e) => {
            tracing::error!(secret = %secret_name, error = %e, "error retrieving connection uri from secret store");
            Err(BootstrapError::SecretRetrieval(e))
        }
    }
}

/// Opens one long-lived client and returns a store bound to `database.collection`.
/// The client is pinged so an unreachable server fails here rather than on the first request.
pub async fn open_collection(
    uri: &str,
    database: &str,
    collection: &str,
) -> Result<MongoNoteStore, BootstrapError> {
    let client = Client::with_uri_str(uri).await.map_err(|e| {
        tracing::error!(error = %e, "error connecting to database");
        BootstrapError::Connection(e)
    })?;
    let store = MongoNoteStore::new(client, database, collection);
    if let Err(e) = store.ping().await {
        tracing::error!(error = %e, "database ping failed");
        return Err(match e {
            crate::error::StoreError::Db(db) => BootstrapError::Connection(db),
            other => BootstrapError::Store(other),
        });
    }
    tracing::info!(database = %database, collection = %collection, "connected to database");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretError;
    use crate::secrets::StaticSecretSource;

    #[tokio::test]
    async fn uri_comes_from_named_secret() {
        let secrets = StaticSecretSource::new().with("MONGO-URI", "mongodb://db:27017");
        let uri = resolve_connection_uri(&secrets, "MONGO-URI").await.unwrap();
        assert_eq!(uri, "mongodb://db:27017");
    }

    #[tokio::test]
    async fn missing_secret_is_fatal() {
        let secrets = StaticSecretSource::new();
        let err = resolve_connection_uri(&secrets, "MONGO-URI").await.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::SecretRetrieval(SecretError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn malformed_uri_is_a_connection_error() {
        let err = open_collection("not-a-connection-string", "notes-db", "notes")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, BootstrapError::Connection(_)));
    }
}

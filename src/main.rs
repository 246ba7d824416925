//! Notes server: resolves the connection URI, connects, then serves the note routes.

use notes_service::{
    app, config::DEFAULT_LOG_FILTER, load_from_env, open_collection, resolve_connection_uri,
    AppState, SecretsManagerSource, UriSource,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = load_from_env()?;

    let uri = match &config.uri_source {
        UriSource::Direct(uri) => {
            tracing::info!("using connection uri from environment");
            uri.clone()
        }
        UriSource::Secret { name, endpoint_url } => {
            tracing::info!(secret = %name, "fetching connection uri from secrets manager");
            let secrets = SecretsManagerSource::from_env(endpoint_url.as_deref()).await;
            resolve_connection_uri(&secrets, name).await?
        }
    };
    let store = open_collection(&uri, &config.database, &config.collection).await?;
    let state = AppState::new(Arc::new(store));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("server running on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

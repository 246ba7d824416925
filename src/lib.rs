//! Notes service: CRUD over a MongoDB collection of notes, with the connection
//! string resolved from AWS Secrets Manager at startup.

pub mod bootstrap;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod secrets;
pub mod service;
pub mod state;
pub mod store;

pub use bootstrap::{open_collection, resolve_connection_uri};
pub use config::{load_from_env, ServiceConfig, UriSource};
pub use error::{AppError, BootstrapError, ConfigError, SecretError, StoreError};
pub use routes::{app, note_routes, health_routes};
pub use secrets::{SecretSource, SecretsManagerSource, StaticSecretSource};
pub use service::NoteService;
pub use state::AppState;
pub use store::{MemoryNoteStore, MongoNoteStore, NoteStore};

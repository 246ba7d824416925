//! Load `ServiceConfig` from environment variables.

use crate::config::types::{ServiceConfig, UriSource};
use crate::error::ConfigError;
use std::net::IpAddr;

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDR: &str = "NOTES_BIND_ADDR";
pub const ENV_SECRET_NAME: &str = "NOTES_SECRET_NAME";
pub const ENV_SECRETS_ENDPOINT: &str = "NOTES_SECRETS_ENDPOINT";
pub const ENV_MONGO_URI: &str = "NOTES_MONGO_URI";
pub const ENV_DATABASE: &str = "NOTES_DATABASE";
pub const ENV_COLLECTION: &str = "NOTES_COLLECTION";

/// Reads the process environment. Call `dotenvy::dotenv()` first to honor a `.env` file.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Builds the config from any key lookup. Blank values count as unset.
pub fn load_with<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let mut config = ServiceConfig::default();

    if let Some(port) = get(ENV_PORT) {
        config.port = parse_port(&port)?;
    }
    if let Some(addr) = get(ENV_BIND_ADDR) {
        config.bind_addr = parse_bind_addr(&addr)?;
    }
    if let Some(db) = get(ENV_DATABASE) {
        config.database = db;
    }
    if let Some(coll) = get(ENV_COLLECTION) {
        config.collection = coll;
    }
    validate_name(ENV_DATABASE, &config.database, &['/', '\\', '.', ' ', '"', '$'])?;
    validate_name(ENV_COLLECTION, &config.collection, &['$'])?;

    config.uri_source = match get(ENV_MONGO_URI) {
        Some(uri) => UriSource::Direct(uri),
        None => UriSource::Secret {
            name: get(ENV_SECRET_NAME).unwrap_or_else(|| crate::config::DEFAULT_SECRET_NAME.into()),
            endpoint_url: get(ENV_SECRETS_ENDPOINT),
        },
    };
    Ok(config)
}

fn parse_port(s: &str) -> Result<u16, ConfigError> {
    match s.parse::<u16>() {
        Ok(0) => Err(ConfigError::Invalid {
            var: ENV_PORT,
            reason: "port must be non-zero".into(),
        }),
        Ok(p) => Ok(p),
        Err(e) => Err(ConfigError::Invalid {
            var: ENV_PORT,
            reason: format!("'{}': {}", s, e),
        }),
    }
}

/// Bind addresses must be IP literals; host names are rejected rather than resolved.
fn parse_bind_addr(s: &str) -> Result<IpAddr, ConfigError> {
    s.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
        var: ENV_BIND_ADDR,
        reason: format!("'{}': {}", s, e),
    })
}

fn validate_name(var: &'static str, name: &str, forbidden: &[char]) -> Result<(), ConfigError> {
    if let Some(c) = name.chars().find(|c| forbidden.contains(c)) {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("'{}' contains '{}'", name, c),
        });
    }
    Ok(())
}

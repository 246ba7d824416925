//! Resolved service settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_SECRET_NAME: &str = "MONGO-URI";
pub const DEFAULT_DATABASE: &str = "notes-db";
pub const DEFAULT_COLLECTION: &str = "notes";
pub const DEFAULT_LOG_FILTER: &str = "notes_service=info,tower_http=info";

/// Where the connection URI comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriSource {
    /// Fetched from Secrets Manager under this secret name.
    Secret {
        name: String,
        endpoint_url: Option<String>,
    },
    /// Given directly, bypassing the secret store.
    Direct(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub uri_source: UriSource,
    pub database: String,
    pub collection: String,
}

impl ServiceConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: DEFAULT_BIND_ADDR,
            port: DEFAULT_PORT,
            uri_source: UriSource::Secret {
                name: DEFAULT_SECRET_NAME.into(),
                endpoint_url: None,
            },
            database: DEFAULT_DATABASE.into(),
            collection: DEFAULT_COLLECTION.into(),
        }
    }
}

//! Secret sources for the connection string: AWS Secrets Manager, or a fixed value.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_secretsmanager::Client;
use std::collections::HashMap;

use crate::error::SecretError;

#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetches the string value of secret `name`.
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError>;
}

/// Secrets Manager client. The credential provider is resolved once when the SDK
/// config is built and cached by the SDK for the life of the client.
#[derive(Clone, Debug)]
pub struct SecretsManagerSource {
    client: Client,
}

impl SecretsManagerSource {
    pub fn from_conf(conf: &SdkConfig) -> Self {
        SecretsManagerSource {
            client: Client::new(conf),
        }
    }

    /// Ambient identity: region and credentials from the standard AWS environment
    /// (env vars, profile, web identity, instance metadata).
    pub async fn from_env(endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        Self::from_conf(&loader.load().await)
    }

    /// Explicit identity: an injected credential provider for a fixed region.
    pub async fn with_credentials(
        region: impl Into<String>,
        credentials: impl ProvideCredentials + 'static,
        endpoint_url: Option<&str>,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .credentials_provider(credentials);
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        Self::from_conf(&loader.load().await)
    }
}

#[async_trait]
impl SecretSource for SecretsManagerSource {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        let out = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| SecretError::Fetch {
                name: name.to_string(),
                source: Box::new(e),
            })?;
        match out.secret_string() {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => Err(SecretError::Empty(name.to_string())),
        }
    }
}

/// Fixed secrets, for tests and local setups without a secret store.
#[derive(Clone, Debug, Default)]
pub struct StaticSecretSource {
    values: HashMap<String, String>,
}

impl StaticSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        match self.values.get(name) {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            Some(_) => Err(SecretError::Empty(name.to_string())),
            None => Err(SecretError::NotFound(name.to_string())),
        }
    }
}

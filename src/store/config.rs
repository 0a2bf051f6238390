use crate::core::{Result, SyncError};
use std::time::Duration;

/// Remote store connection configuration
///
/// The hosted store is addressed by a base URL and an API key; nothing
/// else is required.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store, e.g. `https://project.example.co`
    pub base_url: String,

    /// API key sent as both `apikey` header and bearer token
    pub api_key: String,

    /// Database schema the REST endpoint exposes
    pub schema: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with default schema and timeout
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            schema: "public".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the schema
    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_string();
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read configuration from `VAULTSYNC_URL` and `VAULTSYNC_API_KEY`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VAULTSYNC_URL")
            .map_err(|_| SyncError::InvalidConfig("VAULTSYNC_URL is not set".to_string()))?;
        let api_key = std::env::var("VAULTSYNC_API_KEY")
            .map_err(|_| SyncError::InvalidConfig("VAULTSYNC_API_KEY is not set".to_string()))?;
        let config = Self::new(&base_url, &api_key);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(SyncError::InvalidConfig("base_url cannot be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SyncError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.api_key.is_empty() {
            return Err(SyncError::InvalidConfig("api_key cannot be empty".to_string()));
        }
        if self.schema.is_empty() {
            return Err(SyncError::InvalidConfig("schema cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Display form that never exposes the API key
    pub fn redacted(&self) -> String {
        format!("{} (key: ***, schema: {})", self.base_url, self.schema)
    }
}

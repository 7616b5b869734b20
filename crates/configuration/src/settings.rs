use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
}

/// Parameters for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "127.0.0.1" or "0.0.0.0".
    pub host: String,
    pub port: u16,
}

/// Parameters for the search index client.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Elasticsearch-compatible node, e.g. "http://localhost:9200".
    pub base_url: String,
}

impl Config {
    /// Rejects values that would only fail later, at bind or request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.search.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "search.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

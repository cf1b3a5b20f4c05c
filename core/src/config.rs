//! Where the records API lives.
//!
//! The base URL is the only setting. It comes from `CATALOG_API_URL`,
//! optionally via a `.env` file.

use crate::client::RecordClient;
use crate::types::is_http_url;

pub const BASE_URL_VAR: &str = "CATALOG_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("CATALOG_API_URL must be an http:// or https:// URL, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim();
        if !is_http_url(base_url) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read the configuration from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(BASE_URL_VAR) {
            Some(url) => Self::new(&url),
            None => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn client(&self) -> RecordClient {
        RecordClient::new(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_uses_default() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn variable_overrides_default_and_drops_trailing_slash() {
        let config = Config::from_lookup(|_| Some("https://dino.example/api/".to_string())).unwrap();
        assert_eq!(config.base_url, "https://dino.example/api");
        assert_eq!(
            config.client().build_list().path,
            "https://dino.example/api/records"
        );
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = Config::from_lookup(|_| Some("localhost:3000".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("localhost:3000".to_string()));
    }
}

//! Remote Configuration
//!
//! Where the positions resource lives and how long to wait for it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/positions";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Settings for the REST collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// URL of the positions collection, e.g. `http://localhost:3000/positions`
    pub base_url: String,
    /// Per-request timeout (native targets only)
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Parse from JSON, filling missing keys with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// Collection URL without a trailing slash
    pub fn collection_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_mock_server() {
        let config = RemoteConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/positions");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let config = RemoteConfig::from_json(r#"{"base_url":"https://api.example.com/positions/"}"#).unwrap();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.collection_url(), "https://api.example.com/positions");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = RemoteConfig::from_json(r#"{"base_url":"ftp://example.com"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));

        let err = RemoteConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

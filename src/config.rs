//! Frontend Configuration
//!
//! Read at compile time from environment variables:
//! - `POSITIONS_API_URL`: positions collection URL, or `memory` for an in-process backend
//! - `POSITIONS_API_TIMEOUT_MS`: request timeout (native builds only)
//! - `POSITIONS_LOG_LEVEL`: `error` | `warn` | `info` | `debug` | `trace` | `off`

use std::str::FromStr;

use log::LevelFilter;
use position_core::RemoteConfig;

/// Sentinel URL selecting the in-memory backend
pub const MEMORY_BACKEND: &str = "memory";

#[derive(Clone, Debug, PartialEq)]
pub enum Backend {
    Http(RemoteConfig),
    InMemory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub backend: Backend,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("POSITIONS_API_URL"),
            option_env!("POSITIONS_API_TIMEOUT_MS"),
            option_env!("POSITIONS_LOG_LEVEL"),
        )
    }

    fn from_values(url: Option<&str>, timeout_ms: Option<&str>, log_level: Option<&str>) -> Self {
        let backend = match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(MEMORY_BACKEND) => Backend::InMemory,
            Some(url) => Backend::Http(RemoteConfig::new(url)),
            None => Backend::Http(RemoteConfig::default()),
        };
        let backend = match (backend, timeout_ms.and_then(|t| t.trim().parse::<u64>().ok())) {
            (Backend::Http(remote), Some(timeout_ms)) => Backend::Http(remote.with_timeout_ms(timeout_ms)),
            (backend, _) => backend,
        };

        let log_level = log_level
            .and_then(|level| LevelFilter::from_str(level.trim()).ok())
            .unwrap_or(LevelFilter::Info);

        Self { backend, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None, None);
        assert_eq!(config.backend, Backend::Http(RemoteConfig::default()));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_custom_url_and_timeout() {
        let config = AppConfig::from_values(Some("https://hr.example.com/api/positions"), Some("2500"), Some("debug"));
        assert_eq!(
            config.backend,
            Backend::Http(RemoteConfig::new("https://hr.example.com/api/positions").with_timeout_ms(2500))
        );
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_memory_backend_and_bad_values() {
        let config = AppConfig::from_values(Some("memory"), Some("soon"), Some("loud"));
        assert_eq!(config.backend, Backend::InMemory);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}

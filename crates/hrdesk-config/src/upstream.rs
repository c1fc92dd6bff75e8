//! Upstream HR API configuration.
//!
//! Role and user permission sets are owned by the HR backend; this service
//! only fetches and saves them.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Where permission sets are fetched from and saved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// The HR REST API at [`UpstreamConfig::base_url`]
    Http,
    /// Process-local store, for development and tests
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(StoreKind::Http),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown permission store `{other}`")),
        }
    }
}

/// # Environment Variables
///
/// - `PERMISSION_STORE`: `http` or `memory` (default: `http`)
/// - `HR_API_BASE_URL`: Base URL of the HR API (default: `http://localhost:8080/api`)
/// - `HR_API_TOKEN`: Bearer token sent to the HR API (default: none)
/// - `HR_API_TIMEOUT_SECS`: Request timeout in seconds (default: `10`)
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub store: StoreKind,
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::Http,
            base_url: "http://localhost:8080/api".into(),
            api_token: None,
            timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store = match env::var("PERMISSION_STORE") {
            Ok(raw) => raw.parse().unwrap_or_else(|err: String| {
                warn!(error = %err, "Falling back to the HTTP permission store");
                StoreKind::Http
            }),
            Err(_) => defaults.store,
        };

        Self {
            store,
            base_url: env::var("HR_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_token: env::var("HR_API_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs: env::var("HR_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("http".parse::<StoreKind>(), Ok(StoreKind::Http));
        assert_eq!(" Memory ".parse::<StoreKind>(), Ok(StoreKind::Memory));
        assert!("postgres".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(UpstreamConfig::default().timeout(), Duration::from_secs(10));
    }
}

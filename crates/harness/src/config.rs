//! Harness configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `API_GATEWAY_URL` - Base URL of the deployed API gateway
//!   (default: `http://localhost:8080`)
//! - `GATEWAY_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `GATEWAY_CONSISTENCY_TIMEOUT_SECS` - Upper bound on read-after-write
//!   polling in flows (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default gateway base URL when `API_GATEWAY_URL` is not set.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONSISTENCY_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Immutable harness configuration.
///
/// Built once (from the environment or explicitly) and passed by reference to
/// every scenario, flow, and load run; the harness keeps no ambient state.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Gateway base URL, normalized without a trailing slash.
    pub gateway_url: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Upper bound on read-after-write polling in flows.
    pub consistency_timeout: Duration,
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let gateway_url = std::env::var("API_GATEWAY_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        let request_timeout = secs_or_default(
            "GATEWAY_TIMEOUT_SECS",
            std::env::var("GATEWAY_TIMEOUT_SECS").ok(),
            DEFAULT_TIMEOUT_SECS,
        )?;
        let consistency_timeout = secs_or_default(
            "GATEWAY_CONSISTENCY_TIMEOUT_SECS",
            std::env::var("GATEWAY_CONSISTENCY_TIMEOUT_SECS").ok(),
            DEFAULT_CONSISTENCY_TIMEOUT_SECS,
        )?;

        Self::new(gateway_url, request_timeout, consistency_timeout)
    }

    /// Build a configuration explicitly (used by tests and embedding code).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `gateway_url` is not a valid http(s) URL.
    pub fn new(
        gateway_url: impl Into<String>,
        request_timeout: Duration,
        consistency_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway_url: normalize_gateway_url(&gateway_url.into())?,
            request_timeout,
            consistency_timeout,
        })
    }

    /// Build a configuration for the given gateway with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `gateway_url` is not a valid http(s) URL.
    pub fn for_gateway(gateway_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(
            gateway_url,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONSISTENCY_TIMEOUT_SECS),
        )
    }
}

/// Validate and normalize the gateway base URL (no trailing slash).
fn normalize_gateway_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("API_GATEWAY_URL".to_string(), e.to_string())
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "API_GATEWAY_URL".to_string(),
            format!("unsupported scheme {:?}", parsed.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Parse an optional seconds value, falling back to a default.
fn secs_or_default(
    key: &str,
    raw: Option<String>,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    match raw {
        None => Ok(Duration::from_secs(default_secs)),
        Some(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        let url = normalize_gateway_url("http://localhost:8080/").expect("valid");
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_gateway_url("not a url").is_err());
    }

    #[test]
    fn test_normalize_rejects_non_http_scheme() {
        assert!(normalize_gateway_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_secs_defaults_when_unset() {
        let timeout = secs_or_default("GATEWAY_TIMEOUT_SECS", None, 10).expect("default");
        assert_eq!(timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_secs_parses_override() {
        let timeout =
            secs_or_default("GATEWAY_TIMEOUT_SECS", Some("30".to_string()), 10).expect("parse");
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_secs_rejects_non_numeric() {
        let result = secs_or_default("GATEWAY_TIMEOUT_SECS", Some("soon".to_string()), 10);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_for_gateway_defaults() {
        let config = HarnessConfig::for_gateway("http://127.0.0.1:9090").expect("valid");
        assert_eq!(config.gateway_url, "http://127.0.0.1:9090");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}

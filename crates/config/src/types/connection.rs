//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (server URL, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection, auth and storage.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `server_url` never carries a trailing slash once built by `ConfigLoader`.

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::AuthConfig;
use crate::types::storage::StorageConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the OpenMRS server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the OpenMRS server (e.g., https://demo.muzima.org/openmrs)
    pub server_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
}

impl ConnectionConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Local index settings
    pub storage: StorageConfig,
}

impl Config {
    /// Create a config with default connection settings.
    pub fn new(
        server_url: String,
        username: String,
        password: SecretString,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            connection: ConnectionConfig::new(server_url),
            auth: AuthConfig::new(username, password),
            storage: StorageConfig::new(data_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_config_timeout_serialized_as_seconds() {
        let mut connection = ConnectionConfig::new("https://demo.muzima.org/openmrs");
        connection.timeout = Duration::from_secs(90);

        let json = serde_json::to_value(&connection).unwrap();
        assert_eq!(json["timeout"], 90);

        let back: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_config_new_uses_defaults() {
        let config = Config::new(
            "https://demo.muzima.org/openmrs".to_string(),
            "admin".to_string(),
            SecretString::new("test".to_string().into()),
            PathBuf::from("/tmp/muzima"),
        );

        assert!(!config.connection.skip_verify);
        assert_eq!(
            config.connection.timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.connection.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/muzima"));
    }
}

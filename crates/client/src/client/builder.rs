//! Client builder for constructing [`OpenmrsClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, credentials)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`OpenmrsClient::download`])
//! - Retry logic for rate-limited requests (handled by [`crate::endpoints`])
//!
//! # Invariants
//! - `base_url` and `credentials` must be provided before calling `build()`
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use muzima_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

use crate::auth::Credentials;
use crate::client::OpenmrsClient;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`OpenmrsClient`].
pub struct OpenmrsClientBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
}

impl Default for OpenmrsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl OpenmrsClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server root, e.g. `https://demo.muzima.org/openmrs`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against test servers with self-signed certificates.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry budget for rate-limited requests.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Pre-configure the builder from a loaded [`Config`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.server_url.clone());
        self.credentials = Some(Credentials::new(
            config.auth.username.clone(),
            config.auth.password.clone(),
        ));
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    /// Remove trailing slashes so resolver paths never produce `//`.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`OpenmrsClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::AuthFailed`] if `credentials` were not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<OpenmrsClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let credentials = self
            .credentials
            .ok_or_else(|| ClientError::AuthFailed("credentials are required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(OpenmrsClient {
            http,
            base_url,
            credentials,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::path::PathBuf;

    fn config() -> Config {
        Config::new(
            "https://demo.muzima.org/openmrs".to_string(),
            "admin".to_string(),
            SecretString::new("test".to_string().into()),
            PathBuf::from("/tmp/muzima"),
        )
    }

    #[test]
    fn test_from_config_builds_client() {
        let client = OpenmrsClient::builder().from_config(&config()).build().unwrap();
        assert_eq!(client.base_url(), "https://demo.muzima.org/openmrs");
        assert_eq!(client.username(), "admin");
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = config();
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);
        config.connection.max_retries = 7;

        let builder = OpenmrsClient::builder().from_config(&config);

        assert_eq!(
            builder.base_url,
            Some("https://demo.muzima.org/openmrs".to_string())
        );
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 7);
    }

    #[test]
    fn test_normalize_base_url_trailing_slash() {
        assert_eq!(
            OpenmrsClientBuilder::normalize_base_url("https://demo.muzima.org/openmrs/".to_string()),
            "https://demo.muzima.org/openmrs"
        );
    }

    #[test]
    fn test_normalize_base_url_multiple_trailing_slashes() {
        assert_eq!(
            OpenmrsClientBuilder::normalize_base_url("http://localhost:8080//".to_string()),
            "http://localhost:8080"
        );
    }
}

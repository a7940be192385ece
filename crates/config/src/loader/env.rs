//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `MUZIMA_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Environment variables take precedence over profile settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_SERVER_URL: &str = "MUZIMA_SERVER_URL";
pub const ENV_USERNAME: &str = "MUZIMA_USERNAME";
pub const ENV_PASSWORD: &str = "MUZIMA_PASSWORD";
pub const ENV_TIMEOUT: &str = "MUZIMA_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "MUZIMA_MAX_RETRIES";
pub const ENV_SKIP_VERIFY: &str = "MUZIMA_SKIP_VERIFY";
pub const ENV_DATA_DIR: &str = "MUZIMA_DATA_DIR";
pub const ENV_CONFIG_PATH: &str = "MUZIMA_CONFIG_PATH";
pub const ENV_PROFILE: &str = "MUZIMA_PROFILE";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, hint: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: hint.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over profile settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_SERVER_URL) {
        loader.set_server_url(Some(url));
    }
    if let Some(username) = env_var_or_none(ENV_USERNAME) {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(skip) = parse_env::<bool>(ENV_SKIP_VERIFY, "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>(ENV_MAX_RETRIES, "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if let Some(dir) = env_var_or_none(ENV_DATA_DIR) {
        loader.set_data_dir(Some(PathBuf::from(dir)));
    }

    // Config path and profile name from environment (only if not already set explicitly)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        loader.set_config_path(Some(PathBuf::from(config_path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none(ENV_PROFILE)
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}

//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Read the JSON profile file.
//! - Apply the selected profile's settings to a ConfigLoader instance.
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - A missing file or missing profile is recorded for `build()`, not reported here.
//! - A present but unreadable or malformed file is an error.

use std::path::Path;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::paths::default_config_path;
use crate::types::{ConfigFile, ProfileConfig};

/// Apply the selected profile from the profile file to the loader.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => default_config_path().map_err(|e| ConfigError::DirUnavailable(e.to_string()))?,
    };

    if !config_path.exists() {
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = read_config_file(&config_path)?;
    match file.profiles.get(&profile_name) {
        Some(profile) => apply_profile_config(loader, profile),
        None => loader.set_profile_missing(Some(profile_name)),
    }

    Ok(())
}

/// Reads and parses the profile file from disk.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if let Some(url) = &profile.server_url {
        loader.set_server_url(Some(url.clone()));
    }
    if let Some(username) = &profile.username {
        loader.set_username(Some(username.clone()));
    }
    if let Some(password) = &profile.password {
        loader.set_password(Some(password.clone()));
    }
    if let Some(skip) = profile.skip_verify {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = profile.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(dir) = &profile.data_dir {
        loader.set_data_dir(Some(dir.clone()));
    }
}

//! Path helpers for configuration and data locations.
//!
//! Responsibilities:
//! - Determine the default profile file path and local index directory.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, INDEX_DIR_NAME};

fn project_dirs() -> Result<directories::ProjectDirs, anyhow::Error> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .context("Failed to determine project directories")
}

/// Returns the default path to the profile configuration file.
///
/// - Linux: `~/.config/muzima/config.json`
/// - macOS: `~/Library/Application Support/muzima/config.json`
/// - Windows: `%AppData%\muzima\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

/// Returns the default directory of the local form index.
pub fn default_data_dir() -> Result<PathBuf, anyhow::Error> {
    Ok(project_dirs()?.data_dir().join(INDEX_DIR_NAME))
}

//! Command handlers, one module per top-level subcommand.

pub mod data;
pub mod forms;
pub mod index;
pub mod templates;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::CommandError;

/// Read entities from a JSON file holding one object or an array of them.
pub(crate) fn read_entities<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_entities(&content)
        .map_err(|e| CommandError::InvalidInput(format!("{}: {}", path.display(), e)).into())
}

fn parse_entities<T: DeserializeOwned>(content: &str) -> serde_json::Result<Vec<T>> {
    match serde_json::from_str::<serde_json::Value>(content)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

//! On-disk partition files.
//!
//! Each partition is one JSON file under the directory of the kind it holds,
//! `{root}/{kind}/{partition}.json`:
//!
//! ```json
//! { "documents": { "<uuid>": { "kind": "form", "revision": 7, "payload": { ... } } } }
//! ```
//!
//! Writes go to a temp file in the same directory and are renamed into place,
//! so readers never observe a half-written partition.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;

use super::StoreError;

pub(crate) const PARTITION_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Document {
    pub kind: String,
    /// Write order within the kind. Files written before revisions existed read as 0.
    #[serde(default)]
    pub revision: u64,
    pub payload: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct PartitionFile {
    #[serde(default)]
    pub documents: BTreeMap<String, Document>,
}

impl PartitionFile {
    /// Read a partition; a missing file is an empty partition.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let content = serde_json::to_vec_pretty(self).map_err(StoreError::Serialize)?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;
        temp_file.write_all(&content).map_err(write_err)?;
        temp_file.flush().map_err(write_err)?;
        temp_file.persist(path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

pub(crate) fn partition_path(root: &Path, kind: &str, partition: &str) -> PathBuf {
    root.join(kind).join(format!("{partition}.{PARTITION_EXTENSION}"))
}

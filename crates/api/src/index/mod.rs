//! Local, file-backed document index.
//!
//! Responsibilities:
//! - Store JSON documents keyed by uuid in named partitions.
//! - Look documents up by kind and uuid, or by kind and [`Query`].
//!
//! Does NOT handle:
//! - Typed decoding (see [`crate::dao`]).
//! - Cross-process locking. One process owns a data directory.
//!
//! Invariants:
//! - A uuid appears at most once per partition; the last write wins.
//! - Partitions live under the directory of the kind they hold, and reads
//!   of a kind only open that kind's partitions.
//! - When a uuid exists in several partitions of a kind, the most recently
//!   written copy wins. Copies without a revision fall back to name order.
//! - Results are ordered by uuid.

mod query;
mod store;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub use query::{Clause, Matcher, Query, QueryBuilder, QueryError};
use store::{Document, PARTITION_EXTENSION, PartitionFile, partition_path};

/// Failures reading or writing partition files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create index directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read partition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Partition {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write partition {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Document {uuid} does not decode as {kind}: {source}")]
    Decode {
        uuid: String,
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid partition or kind name: {0:?}")]
    InvalidPartition(String),
}

/// Partitioned document store rooted at a data directory.
#[derive(Debug)]
pub struct LocalIndex {
    root: PathBuf,
    /// Latest revision written per kind; also serializes writes.
    revisions: Mutex<HashMap<String, u64>>,
}

impl LocalIndex {
    /// Open (creating if needed) the index at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        create_dir(&root)?;
        debug!(root = %root.display(), "Opened local index");
        Ok(Self {
            root,
            revisions: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Insert or replace documents in one partition.
    ///
    /// Every document in the batch gets the same revision, newer than any
    /// earlier write of the kind.
    pub fn put_all(
        &self,
        partition: &str,
        kind: &str,
        documents: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<usize, StoreError> {
        let path = self.partition_path(kind, partition)?;
        let mut revisions = self.revisions.lock().unwrap_or_else(PoisonError::into_inner);

        let latest = match revisions.get(kind) {
            Some(latest) => *latest,
            None => self.latest_revision(kind)?,
        };
        let revision = latest + 1;

        create_dir(&self.root.join(kind))?;
        let mut file = PartitionFile::load(&path)?;
        let mut count = 0;
        for (uuid, payload) in documents {
            file.documents.insert(
                uuid,
                Document {
                    kind: kind.to_string(),
                    revision,
                    payload,
                },
            );
            count += 1;
        }
        file.save(&path)?;
        revisions.insert(kind.to_string(), revision);

        debug!(partition, kind, count, revision, "Stored documents");
        Ok(count)
    }

    pub fn put(
        &self,
        partition: &str,
        kind: &str,
        uuid: &str,
        payload: Value,
    ) -> Result<(), StoreError> {
        self.put_all(partition, kind, [(uuid.to_string(), payload)])
            .map(|_| ())
    }

    /// Remove a document. Returns whether it was present; absence is not an error.
    pub fn remove(&self, partition: &str, kind: &str, uuid: &str) -> Result<bool, StoreError> {
        let path = self.partition_path(kind, partition)?;
        let _guard = self.revisions.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = PartitionFile::load(&path)?;
        let removed = file.documents.remove(uuid).is_some();
        if removed {
            file.save(&path)?;
        }

        debug!(partition, kind, uuid, removed, "Removed document");
        Ok(removed)
    }

    /// Payload of the newest document with this kind and uuid.
    pub fn get(&self, kind: &str, uuid: &str) -> Result<Option<Value>, StoreError> {
        let mut newest: Option<Document> = None;
        for partition in self.partitions(kind)? {
            let mut file = PartitionFile::load(&partition_path(&self.root, kind, &partition))?;
            if let Some(doc) = file.documents.remove(uuid)
                && doc.kind == kind
                && newest.as_ref().is_none_or(|n| doc.revision > n.revision)
            {
                newest = Some(doc);
            }
        }
        Ok(newest.map(|doc| doc.payload))
    }

    /// Payloads of every document of `kind` matching `query`, ordered by uuid.
    ///
    /// The query is applied to the newest copy of each uuid only.
    pub fn search(&self, kind: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let mut merged: BTreeMap<String, Document> = BTreeMap::new();
        for partition in self.partitions(kind)? {
            let file = PartitionFile::load(&partition_path(&self.root, kind, &partition))?;
            for (uuid, doc) in file.documents {
                if doc.kind != kind {
                    continue;
                }
                match merged.entry(uuid) {
                    Entry::Vacant(entry) => {
                        entry.insert(doc);
                    }
                    Entry::Occupied(mut entry) if doc.revision > entry.get().revision => {
                        entry.insert(doc);
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }
        Ok(merged
            .into_values()
            .filter(|doc| query.matches(&doc.payload))
            .map(|doc| doc.payload)
            .collect())
    }

    /// Names of the partitions of `kind` present on disk, sorted.
    pub fn partitions(&self, kind: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.kind_dir(kind)?;
        let read_err = |source| StoreError::Read {
            path: dir.clone(),
            source,
        };

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_err(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PARTITION_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_valid_name(stem)
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Highest revision stored for `kind`. Unreadable partitions are skipped;
    /// their documents are unreachable until repaired.
    fn latest_revision(&self, kind: &str) -> Result<u64, StoreError> {
        let mut latest = 0;
        for partition in self.partitions(kind)? {
            match PartitionFile::load(&partition_path(&self.root, kind, &partition)) {
                Ok(file) => {
                    let max = file.documents.values().map(|d| d.revision).max();
                    latest = latest.max(max.unwrap_or_default());
                }
                Err(e) => {
                    warn!(kind, partition = %partition, error = %e, "Skipping unreadable partition");
                }
            }
        }
        Ok(latest)
    }

    fn kind_dir(&self, kind: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_name(kind) {
            return Err(StoreError::InvalidPartition(kind.to_string()));
        }
        Ok(self.root.join(kind))
    }

    fn partition_path(&self, kind: &str, partition: &str) -> Result<PathBuf, StoreError> {
        self.kind_dir(kind)?;
        if !is_valid_name(partition) {
            return Err(StoreError::InvalidPartition(partition.to_string()));
        }
        Ok(partition_path(&self.root, kind, partition))
    }
}

fn create_dir(path: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(path).map_err(|source| StoreError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index() -> (tempfile::TempDir, LocalIndex) {
        let dir = tempfile::tempdir().unwrap();
        let index = LocalIndex::open(dir.path().join("index")).unwrap();
        (dir, index)
    }

    #[test]
    fn test_put_then_get() {
        let (_dir, index) = index();
        index
            .put("uuid_form", "form", "f-1", json!({"uuid": "f-1", "name": "Vitals"}))
            .unwrap();

        let doc = index.get("form", "f-1").unwrap().unwrap();
        assert_eq!(doc["name"], "Vitals");
        assert!(index.get("form_template", "f-1").unwrap().is_none());
        assert!(index.get("form", "f-2").unwrap().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let (_dir, index) = index();
        index.put("p", "form", "f-1", json!({"name": "old"})).unwrap();
        index.put("p", "form", "f-1", json!({"name": "new"})).unwrap();

        let all = index.search("form", &Query::all()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["name"], "new");
    }

    #[test]
    fn test_search_merges_partitions_by_uuid() {
        let (_dir, index) = index();
        index.put("a", "form", "f-2", json!({"uuid": "f-2"})).unwrap();
        index.put("b", "form", "f-1", json!({"uuid": "f-1"})).unwrap();
        index.put("b", "form", "f-2", json!({"uuid": "f-2"})).unwrap();

        let all = index.search("form", &Query::all()).unwrap();
        let uuids: Vec<_> = all.iter().map(|d| d["uuid"].as_str().unwrap()).collect();
        assert_eq!(uuids, vec!["f-1", "f-2"]);
    }

    #[test]
    fn test_newest_copy_wins_across_partitions() {
        let (_dir, index) = index();
        index.put("b", "form", "f-1", json!({"name": "first"})).unwrap();
        index.put("a", "form", "f-1", json!({"name": "second"})).unwrap();
        assert_eq!(index.get("form", "f-1").unwrap().unwrap()["name"], "second");

        index.put("b", "form", "f-1", json!({"name": "third"})).unwrap();
        assert_eq!(index.get("form", "f-1").unwrap().unwrap()["name"], "third");

        let all = index.search("form", &Query::all()).unwrap();
        assert_eq!(all, vec![json!({"name": "third"})]);
    }

    #[test]
    fn test_query_sees_only_the_newest_copy() {
        let (_dir, index) = index();
        index.put("a", "form", "f-1", json!({"name": "Old Name"})).unwrap();
        index.put("b", "form", "f-1", json!({"name": "New Name"})).unwrap();

        let stale = Query::parse(r#"name:"Old Name""#).unwrap();
        assert!(index.search("form", &stale).unwrap().is_empty());
    }

    #[test]
    fn test_revisions_continue_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let index = LocalIndex::open(dir.path()).unwrap();
            index.put("b", "form", "f-1", json!({"name": "first"})).unwrap();
            index.put("b", "form", "f-1", json!({"name": "second"})).unwrap();
        }

        let index = LocalIndex::open(dir.path()).unwrap();
        index.put("a", "form", "f-1", json!({"name": "after reopen"})).unwrap();
        assert_eq!(
            index.get("form", "f-1").unwrap().unwrap()["name"],
            "after reopen"
        );
    }

    #[test]
    fn test_search_filters_by_kind_and_query() {
        let (_dir, index) = index();
        index
            .put_all(
                "local_form_data",
                "form_data",
                [
                    ("d-1".to_string(), json!({"status": "complete"})),
                    ("d-2".to_string(), json!({"status": "incomplete"})),
                ],
            )
            .unwrap();
        index.put("other", "form", "f-1", json!({"status": "complete"})).unwrap();

        let query = Query::parse(r#"status:"complete""#).unwrap();
        let found = index.search("form_data", &query).unwrap();
        assert_eq!(found, vec![json!({"status": "complete"})]);
    }

    #[test]
    fn test_remove_absent_is_not_an_error() {
        let (_dir, index) = index();
        assert!(!index.remove("uuid_form", "form", "missing").unwrap());

        index.put("uuid_form", "form", "f-1", json!({})).unwrap();
        assert!(index.remove("uuid_form", "form", "f-1").unwrap());
        assert!(index.get("form", "f-1").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_partition_fails_reads_and_writes() {
        let (_dir, index) = index();
        std::fs::create_dir_all(index.root().join("form")).unwrap();
        std::fs::write(index.root().join("form/search_form.json"), "garbage").unwrap();

        assert!(matches!(
            index.get("form", "f-1").unwrap_err(),
            StoreError::Corrupt { .. }
        ));
        assert!(matches!(
            index.remove("search_form", "form", "f-1").unwrap_err(),
            StoreError::Corrupt { .. }
        ));
        assert!(matches!(
            index.put("search_form", "form", "f-1", json!({})).unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_corrupt_partition_leaves_other_kinds_readable() {
        let (_dir, index) = index();
        index.put("uuid_form", "form", "f-1", json!({"uuid": "f-1"})).unwrap();
        std::fs::create_dir_all(index.root().join("form_data")).unwrap();
        std::fs::write(index.root().join("form_data/local_form_data.json"), "{ corrupt").unwrap();

        assert!(index.get("form", "f-1").unwrap().is_some());
        assert_eq!(index.search("form", &Query::all()).unwrap().len(), 1);
        assert!(matches!(
            index.search("form_data", &Query::all()).unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_corrupt_sibling_partition_does_not_block_writes() {
        let (_dir, index) = index();
        std::fs::create_dir_all(index.root().join("form")).unwrap();
        std::fs::write(index.root().join("form/search_form.json"), "garbage").unwrap();

        index.put("uuid_form", "form", "f-1", json!({"uuid": "f-1"})).unwrap();
        assert_eq!(index.partitions("form").unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let (_dir, index) = index();
        let err = index.put("../escape", "form", "f-1", json!({})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPartition(_)));

        let err = index.get("../form", "f-1").unwrap_err();
        assert!(matches!(err, StoreError::InvalidPartition(_)));
    }

    #[test]
    fn test_partitions_ignores_other_files() {
        let (_dir, index) = index();
        index.put("uuid_form", "form", "f-1", json!({})).unwrap();
        std::fs::write(index.root().join("form/notes.txt"), "hi").unwrap();

        assert_eq!(index.partitions("form").unwrap(), vec!["uuid_form".to_string()]);
        assert!(index.partitions("form_data").unwrap().is_empty());
    }
}

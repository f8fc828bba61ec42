use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write as _},
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::dao::{
    kv::KeyValueStore,
    storage::{StorageError, StorageResult},
};

/// Durable [`KeyValueStore`] keeping every key in a single JSON document on disk.
///
/// The whole document is rewritten on each mutation, via a temp file in the
/// same directory followed by a rename, so a crash mid-write leaves the
/// previous document intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store backed by the document at `path`.
    ///
    /// A missing file starts the store empty; an unreadable or malformed
    /// document does the same, so a corrupt file never blocks startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "malformed store document; starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read store document; starting empty"
                );
                HashMap::new()
            }
        };

        Self { path, entries }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(&self.entries)
            .map_err(|source| StorageError::encode(key, source))?;
        self.write_atomic(&data)
            .map_err(|source| StorageError::write(key, source))
    }

    fn write_atomic(&self, data: &[u8]) -> std::io::Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(data)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = FileStore::open(&path);
        store.set("current", r#"{"homeGoals":2}"#).unwrap();
        store.set("history", "[]").unwrap();
        drop(store);

        let store = FileStore::open(&path);
        assert_eq!(store.get("current").as_deref(), Some(r#"{"homeGoals":2}"#));
        assert_eq!(store.get("history").as_deref(), Some("[]"));
    }

    #[test]
    fn remove_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = FileStore::open(&path);
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        drop(store);

        let store = FileStore::open(&path);
        assert_eq!(store.get("key"), None);
    }

    #[test]
    fn malformed_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("scores.json");

        let mut store = FileStore::open(&path);
        store.set("key", "value").unwrap();
        assert!(path.exists());
    }
}

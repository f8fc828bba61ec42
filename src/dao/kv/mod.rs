//! Key-value persistence boundary.
//!
//! The core only ever talks to storage through [`KeyValueStore`]: a
//! synchronous, string-keyed get/set/remove capability scoped to one
//! device. Two backends are provided, a volatile in-memory map and a
//! durable single-file store.

mod file;

use std::collections::HashMap;

use crate::dao::storage::StorageResult;

pub use file::FileStore;

/// Synchronous key-value storage capability.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value stored under `key`; removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Volatile store used when no durable medium is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("value"));

        store.set("key", "other").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("other"));

        store.remove("key").unwrap();
        assert_eq!(store.get("key"), None);
    }

    #[test]
    fn removing_absent_key_is_a_no_op() {
        let mut store = MemoryStore::new();
        store.remove("never-set").unwrap();
    }
}

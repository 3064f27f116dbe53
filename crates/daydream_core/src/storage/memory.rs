//! In-process key-value backend.

use super::{KvBackend, StorageError, StorageResult};
use std::collections::BTreeMap;

/// Map-backed store with an optional total byte quota.
///
/// Usage is counted as key bytes plus value bytes over all entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `quota` bytes are in use.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes currently counted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvBackend for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |existing| key.len() + existing.len());
            let required = self.used_bytes() - replaced + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::storage::{KvBackend, StorageError};

    #[test]
    fn set_get_remove_roundtrip() {
        let mut store = MemoryKvStore::new();
        store.set("k", b"v1").unwrap();
        store.set("k", b"v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v2"[..]));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn quota_counts_replaced_values_once() {
        let mut store = MemoryKvStore::with_quota(10);
        store.set("k", b"123456789").unwrap();
        store.set("k", b"987654321").unwrap();
        assert_eq!(store.used_bytes(), 10);

        let err = store.set("x", b"1").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 12,
                quota: 10,
                ..
            }
        ));
        assert!(!store.contains_key("x"));
    }
}

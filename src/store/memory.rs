//! In-memory record store
//!
//! Keeps records in a sorted map. Used as the injected test double and for
//! throwaway sessions; an optional quota mimics a browser storage budget.

use crate::store::error::{StoreError, StoreResult};
use crate::store::{record_size, RecordStore};
use std::collections::BTreeMap;

/// Record store backed by a `BTreeMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota_bytes` would be exceeded
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes used by all records
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| record_size(k, v)).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota) = self.quota_bytes {
            let others: usize = self
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| record_size(k, v))
                .sum();
            let needed = others + record_size(key, value);
            if needed > quota {
                tracing::warn!("Write to '{}' refused: {} > {} bytes", key, needed, quota);
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

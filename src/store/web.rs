//! Browser `localStorage` record store
//!
//! The per-origin substrate the app runs on in the browser. Only compiled
//! with the `web` feature.

use crate::store::error::{StoreError, StoreResult};
use crate::store::{record_size, RecordStore};

/// Error for a `setItem` the browser refused
///
/// `setItem` only throws for QuotaExceededError (or SecurityError, which
/// already failed in `open`).
fn rejected_write(key: &str, value: &str) -> StoreError {
    StoreError::QuotaExceeded {
        key: key.to_string(),
        needed: record_size(key, value),
    }
}

fn backend_error(e: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

/// Record store over `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Attach to the current window's local storage
    pub fn open() -> StoreResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl RecordStore for LocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(backend_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(|e| {
            tracing::warn!("localStorage rejected '{}': {:?}", key, e);
            rejected_write(key, value)
        })
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.storage
            .remove_item(key)
            .map_err(backend_error)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(backend_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self
                .storage
                .key(i)
                .map_err(backend_error)?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

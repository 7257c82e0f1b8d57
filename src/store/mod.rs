//! Local Record Store
//!
//! Every piece of app state (profile, last login, mood, tracker, vaccination
//! list) is an independent record stored as one JSON value under a fixed key.
//!
//! - **RecordStore**: raw string get/set over a per-origin key-value substrate
//! - **RecordStoreExt**: typed `read`/`write` on top of any store
//! - **memory**: in-process backend, used as a test double
//! - **file**: one JSON file per key in a data directory
//! - **web**: browser `localStorage` (feature `web`)
//!
//! # Read/write cycle
//!
//! ```text
//! read(key, fallback) → mutate → write(key, value) → project to view
//! ```
//!
//! `read` never fails: a missing, unreadable or malformed record yields the
//! caller's fallback and a warning in the log. `write` replaces the whole value
//! and reports failures (quota, I/O) to the caller. Handlers that write back
//! what they read use `try_read`, which passes backend failures up instead.

pub mod error;
pub mod file;
pub mod memory;
#[cfg(feature = "web")]
pub mod web;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "web")]
pub use web::LocalStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Keys under which the app persists its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Owner + dog profile
    Profile,
    /// Most recent login submission
    LastLogin,
    /// Current mood selection
    Mood,
    /// Daily task checklist
    Tracker,
    /// Vaccination list
    Vaccinations,
}

impl RecordKey {
    /// The stable storage key
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Profile => "woofwell_profile",
            RecordKey::LastLogin => "woofwell_last_email",
            RecordKey::Mood => "woofwell_mood",
            RecordKey::Tracker => "woofwell_tracker",
            RecordKey::Vaccinations => "woofwell_vax",
        }
    }

    pub fn all() -> &'static [RecordKey] {
        &[
            RecordKey::Profile,
            RecordKey::LastLogin,
            RecordKey::Mood,
            RecordKey::Tracker,
            RecordKey::Vaccinations,
        ]
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bytes a record occupies against a quota (key + value, like the browser counts it)
pub fn record_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Raw key-value substrate
///
/// Implementations are synchronous and single-writer. `set_item` fully
/// replaces the previous value.
pub trait RecordStore {
    /// Fetch the raw stored string, `None` if the key was never written
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any prior value
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a key; deleting a missing key is not an error
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;

    /// All keys currently present
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Typed accessors shared by every store
pub trait RecordStoreExt: RecordStore {
    /// Read and deserialize the record at `key`, or return `fallback`
    ///
    /// Never fails. Absent keys fall back silently; unreadable or malformed
    /// records fall back with a warning.
    fn read<T: DeserializeOwned>(&self, key: impl AsRef<str>, fallback: T) -> T {
        let key = key.as_ref();
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!("Failed to read record '{}', using fallback: {}", key, e);
                fallback
            }
        }
    }

    /// Read a record for a read-modify-write cycle
    ///
    /// Absent and malformed records are `Ok(None)`; a failing backend is an
    /// error, so callers never overwrite a record they could not see.
    fn try_read<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> StoreResult<Option<T>> {
        let key = key.as_ref();
        match self.get_item(key)? {
            Some(raw) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!("Failed to parse record '{}', ignoring it: {}", key, e);
                    Ok(None)
                }
            },
            _ => {
                tracing::debug!("Record '{}' not present", key);
                Ok(None)
            }
        }
    }

    /// Read a record, `None` if it is absent or malformed
    fn read_opt<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Option<T> {
        self.read(key, None)
    }

    /// Serialize `value` and store it at `key`, replacing any prior value
    fn write<T: Serialize + ?Sized>(&mut self, key: impl AsRef<str>, value: &T) -> StoreResult<()> {
        let key = key.as_ref();
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)?;
        tracing::trace!("Wrote record '{}' ({} bytes)", key, raw.len());
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}

/// Test double whose reads can be switched to fail
#[cfg(test)]
pub(crate) mod testing {
    use super::{MemoryStore, RecordStore, StoreError, StoreResult};

    #[derive(Debug, Default)]
    pub(crate) struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_reads: bool,
    }

    impl RecordStore for FlakyStore {
        fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
            if self.fail_reads {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("read of '{}' failed", key),
                )));
            }
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> StoreResult<()> {
            self.inner.remove_item(key)
        }

        fn keys(&self) -> StoreResult<Vec<String>> {
            self.inner.keys()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "Bella".to_string(),
            count: 3,
            tags: vec!["golden".to_string()],
        }
    }

    #[test]
    fn test_record_keys_are_stable() {
        assert_eq!(RecordKey::Profile.as_str(), "woofwell_profile");
        assert_eq!(RecordKey::LastLogin.as_str(), "woofwell_last_email");
        assert_eq!(RecordKey::Mood.as_str(), "woofwell_mood");
        assert_eq!(RecordKey::Tracker.as_str(), "woofwell_tracker");
        assert_eq!(RecordKey::Vaccinations.to_string(), "woofwell_vax");
        assert_eq!(RecordKey::all().len(), 5);
    }

    #[test]
    fn test_write_then_read_ignores_fallback() {
        let mut store = MemoryStore::new();
        store.write("sample", &sample()).unwrap();

        let other = Sample {
            name: "other".to_string(),
            count: 0,
            tags: vec![],
        };
        assert_eq!(store.read("sample", other), sample());
    }

    #[test]
    fn test_read_missing_returns_fallback() {
        let store = MemoryStore::new();
        let fallback = sample();
        assert_eq!(store.read("never_written", fallback.clone()), fallback);
        assert_eq!(store.read_opt::<Sample>("never_written"), None);
    }

    #[test]
    fn test_read_corrupted_returns_fallback() {
        let mut store = MemoryStore::new();
        store.set_item("sample", "{not json").unwrap();
        assert_eq!(store.read("sample", 7u32), 7);

        // Valid JSON, wrong shape
        store.set_item("sample", r#"{"name": 12}"#).unwrap();
        assert_eq!(store.read_opt::<Sample>("sample"), None);

        // Empty value is treated as absent
        store.set_item("sample", "").unwrap();
        assert_eq!(store.read("sample", sample()), sample());
    }

    #[test]
    fn test_write_replaces_whole_value() {
        let mut store = MemoryStore::new();
        let mut first = BTreeMap::new();
        first.insert("a".to_string(), true);
        first.insert("b".to_string(), true);
        store.write("map", &first).unwrap();

        let second: BTreeMap<String, bool> = BTreeMap::new();
        store.write("map", &second).unwrap();

        let restored: BTreeMap<String, bool> = store.read("map", first);
        assert!(restored.is_empty());
    }

    #[test]
    fn test_boxed_dyn_store() {
        let mut store: Box<dyn RecordStore> = Box::new(MemoryStore::new());
        store.write(RecordKey::Mood, &"happy").unwrap();
        assert_eq!(store.read(RecordKey::Mood, String::new()), "happy");
        assert_eq!(store.keys().unwrap(), vec!["woofwell_mood".to_string()]);
    }

    #[test]
    fn test_try_read_separates_absent_from_failure() {
        let mut store = testing::FlakyStore::default();
        assert_eq!(store.try_read::<Sample>("sample").unwrap(), None);

        store.write("sample", &sample()).unwrap();
        assert_eq!(store.try_read("sample").unwrap(), Some(sample()));

        store.inner.set_item("other", "{not json").unwrap();
        assert_eq!(store.try_read::<Sample>("other").unwrap(), None);

        store.fail_reads = true;
        assert!(matches!(
            store.try_read::<Sample>("sample"),
            Err(StoreError::Io(_))
        ));
        // Plain reads still fall back
        assert_eq!(store.read("sample", 3u32), 3);
    }
}

//! File-backed record store
//!
//! Each record lives in `<data_dir>/<key>.json`. Writes go through a
//! temporary file and a rename so a failed write never leaves a half-written
//! record behind.
//!
//! Layout:
//! ```text
//! data_dir/
//!   woofwell_profile.json
//!   woofwell_tracker.json
//!   woofwell_vax.json
//!   ...
//! ```

use crate::store::error::{StoreError, StoreResult};
use crate::store::{record_size, RecordStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const RECORD_EXT: &str = "json";
const TMP_EXT: &str = "json.tmp";

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Record store persisting one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        tracing::debug!("Opened record store at {:?}", data_dir);
        Ok(Self {
            data_dir,
            quota_bytes: None,
        })
    }

    /// Builder: reject writes once the store would exceed `quota_bytes`
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn quota_bytes(&self) -> Option<usize> {
        self.quota_bytes
    }

    /// Total bytes used by all records (key + file length)
    pub fn used_bytes(&self) -> StoreResult<usize> {
        self.used_bytes_excluding(None)
    }

    fn used_bytes_excluding(&self, skip: Option<&str>) -> StoreResult<usize> {
        let mut total = 0;
        for key in self.keys()? {
            if Some(key.as_str()) == skip {
                continue;
            }
            let len = std::fs::metadata(self.record_path(&key))?.len() as usize;
            total += key.len() + len;
        }
        Ok(total)
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", key, RECORD_EXT))
    }

    /// Resolve a key to its file, rejecting anything that is not a plain name
    fn checked_path(&self, key: &str) -> StoreResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.record_path(key))
    }
}

impl RecordStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.checked_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.checked_path(key)?;

        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_excluding(Some(key))? + record_size(key, value);
            if needed > quota {
                tracing::warn!("Write to '{}' refused: {} > {} bytes", key, needed, quota);
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                });
            }
        }

        let tmp = self.data_dir.join(format!("{}.{}", key, TMP_EXT));
        std::fs::write(&tmp, value)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        let path = self.checked_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == RECORD_EXT).unwrap_or(false) {
                match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) if is_valid_key(stem) => keys.push(stem.to_string()),
                    _ => {}
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStoreExt;
    use tempfile::tempdir;

    fn create_test_store() -> (FileStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("records")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_get_missing() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get_item("woofwell_mood").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_set_get_overwrite() {
        let (mut store, _dir) = create_test_store();
        store.set_item("woofwell_mood", r#"{"mood":"happy"}"#).unwrap();
        store.set_item("woofwell_mood", r#"{"mood":"calm"}"#).unwrap();

        assert_eq!(
            store.get_item("woofwell_mood").unwrap().as_deref(),
            Some(r#"{"mood":"calm"}"#)
        );
        assert_eq!(store.keys().unwrap(), vec!["woofwell_mood".to_string()]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.write("woofwell_vax", &vec!["Rabies", "DHPP"]).unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let list: Vec<String> = store.read("woofwell_vax", Vec::new());
        assert_eq!(list, vec!["Rabies".to_string(), "DHPP".to_string()]);
    }

    #[test]
    fn test_remove() {
        let (mut store, _dir) = create_test_store();
        store.set_item("woofwell_tracker", "{}").unwrap();
        store.remove_item("woofwell_tracker").unwrap();
        store.remove_item("woofwell_tracker").unwrap();
        assert_eq!(store.get_item("woofwell_tracker").unwrap(), None);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let (mut store, _dir) = create_test_store();
        for key in ["", "../escape", "a/b", "with space"] {
            let err = store.set_item(key, "x").unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "key {:?}", key);
        }
    }

    #[test]
    fn test_quota_exceeded_keeps_prior_value() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap().with_quota(20);

        // "k" (1) + 10 bytes
        store.set_item("k", "0123456789").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 11);

        let err = store.set_item("k", "0123456789012345678901").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(
            store.get_item("k").unwrap().as_deref(),
            Some("0123456789")
        );

        // A second key counts against the same budget
        let err = store.set_item("other", "0123456789").unwrap_err();
        assert!(err.is_quota_exceeded());
        store.set_item("other", "0123").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 20);
    }

    #[test]
    fn test_ignores_foreign_files() {
        let (mut store, _dir) = create_test_store();
        store.set_item("woofwell_mood", "{}").unwrap();
        std::fs::write(store.data_dir().join("notes.txt"), "hi").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["woofwell_mood".to_string()]);
    }

    #[test]
    fn test_unaddressable_json_files_do_not_count() {
        let (store, _dir) = create_test_store();
        let mut store = store.with_quota(100);
        std::fs::write(store.data_dir().join("notes.v2.json"), "x".repeat(500)).unwrap();

        assert!(store.keys().unwrap().is_empty());
        assert_eq!(store.used_bytes().unwrap(), 0);
        store.set_item("woofwell_mood", r#"{"mood":"calm"}"#).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["woofwell_mood".to_string()]);
    }
}

//! Record store error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur while reading or writing records
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Write rejected because the store would exceed its capacity
    #[error("Quota exceeded writing '{key}' ({needed} bytes)")]
    QuotaExceeded { key: String, needed: usize },

    /// Key cannot be used by this backend
    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),

    /// The storage substrate is not reachable (e.g. no window.localStorage)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl StoreError {
    /// True when the write was refused for lack of space
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

//! Current mood
//!
//! One record holding the latest mood selection. Each selection replaces the
//! previous one; no history is kept.

use crate::store::{RecordKey, RecordStore, RecordStoreExt, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest mood selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    /// Free-form tag from the mood buttons (e.g. "happy", "tired")
    pub mood: String,
    /// Unix timestamp in milliseconds
    pub at: i64,
}

impl Mood {
    pub fn new(tag: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            mood: tag.into(),
            at: at.timestamp_millis(),
        }
    }

    /// When the mood was recorded, if the stored timestamp is valid
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.at)
    }
}

/// Replace the current mood
pub fn set_mood<S: RecordStore + ?Sized>(
    store: &mut S,
    tag: &str,
    now: DateTime<Utc>,
) -> StoreResult<Mood> {
    let mood = Mood::new(tag.trim(), now);
    store.write(RecordKey::Mood, &mood)?;
    tracing::debug!("Mood set to {:?}", mood.mood);
    Ok(mood)
}

/// Current mood, `None` if never set or unreadable
pub fn current_mood<S: RecordStore + ?Sized>(store: &S) -> Option<Mood> {
    store.read_opt(RecordKey::Mood)
}

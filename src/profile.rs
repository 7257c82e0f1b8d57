//! Profile and login records
//!
//! The profile holds the owner's email/password (demo only, never checked)
//! and the dog's details. It is replaced as a whole on signup and seeded with
//! demo data the first time the app starts without one. Login submissions
//! only record the last attempted email.

use crate::store::{RecordKey, RecordStore, RecordStoreExt, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown for any missing dog detail
pub const PLACEHOLDER: &str = "—";

/// Owner account plus dog details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
    /// Stored in plaintext for the UI flow only
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog: Option<Dog>,
}

/// Dog details; every field may be blank
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourite: Option<String>,
}

/// Dog details with every blank resolved to display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDog {
    /// `None` when no name was given; callers pick their own wording
    pub name: Option<String>,
    pub age: String,
    pub breed: String,
    pub size: String,
    pub favourite: String,
}

/// Last login form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastLoginAttempt {
    pub email: String,
    /// Unix timestamp in milliseconds
    pub when: i64,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Dog {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        breed: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age.into()),
            breed: Some(breed.into()),
            size: Some(size.into()),
            favourite: None,
        }
    }

    /// Builder: set favourite activity
    pub fn favourite(mut self, favourite: impl Into<String>) -> Self {
        self.favourite = Some(favourite.into());
        self
    }

    /// The single place blanks are turned into display fallbacks
    pub fn resolve(&self) -> ResolvedDog {
        let or_placeholder = |v: &Option<String>| non_blank(v).unwrap_or(PLACEHOLDER).to_string();
        ResolvedDog {
            name: non_blank(&self.name).map(str::to_string),
            age: or_placeholder(&self.age),
            breed: or_placeholder(&self.breed),
            size: or_placeholder(&self.size),
            favourite: non_blank(&self.favourite)
                .unwrap_or("Fetch and long cuddles")
                .to_string(),
        }
    }
}

impl Profile {
    pub fn new(email: impl Into<String>, password: impl Into<String>, dog: Dog) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            dog: Some(dog),
        }
    }

    /// Starter profile used when the app first runs
    pub fn demo() -> Self {
        Self::new(
            "",
            "",
            Dog::new("Bella", "3 years", "Golden Retriever", "medium").favourite("Playing fetch"),
        )
    }

    /// Resolved dog details; a missing dog resolves like an all-blank one
    pub fn resolved_dog(&self) -> ResolvedDog {
        self.dog.clone().unwrap_or_default().resolve()
    }
}

/// Stored profile, `None` if absent or unreadable
pub fn load_profile<S: RecordStore + ?Sized>(store: &S) -> Option<Profile> {
    store.read_opt(RecordKey::Profile)
}

/// Write the demo profile unless one is already stored
///
/// Returns `true` when the demo profile was written.
pub fn ensure_profile_seeded<S: RecordStore + ?Sized>(store: &mut S) -> StoreResult<bool> {
    let stored: Option<Profile> = store.try_read(RecordKey::Profile)?;
    if stored.is_some() {
        return Ok(false);
    }
    store.write(RecordKey::Profile, &Profile::demo())?;
    tracing::info!("Seeded demo profile");
    Ok(true)
}

/// Replace the stored profile with a signup submission
pub fn signup<S: RecordStore + ?Sized>(store: &mut S, profile: &Profile) -> StoreResult<()> {
    store.write(RecordKey::Profile, profile)?;
    tracing::info!("Profile saved for {:?}", profile.email);
    Ok(())
}

/// Record a login submission; any email is accepted
pub fn record_login<S: RecordStore + ?Sized>(
    store: &mut S,
    email: &str,
    now: DateTime<Utc>,
) -> StoreResult<LastLoginAttempt> {
    let attempt = LastLoginAttempt {
        email: email.to_string(),
        when: now.timestamp_millis(),
    };
    store.write(RecordKey::LastLogin, &attempt)?;
    tracing::info!("Login recorded for {:?}", email);
    Ok(attempt)
}

/// Most recent login submission, if any
pub fn last_login<S: RecordStore + ?Sized>(store: &S) -> Option<LastLoginAttempt> {
    store.read_opt(RecordKey::LastLogin)
}

//! # WoofWell
//!
//! Pet-care tracking state layer: dog profile, mood, a daily task checklist
//! and vaccination records, all kept in a local key-value record store.
//!
//! ## Features
//!
//! - **Record store**: typed read/write over any key-value substrate, with
//!   safe fallbacks for missing or corrupted records
//! - **Tracker**: five daily tasks with completion percentage and points
//! - **Vaccinations**: ordered list with overdue/upcoming/completed status
//! - **Profile & mood**: demo seeding, signup, login record, current mood
//! - **Food suggestions**: simple rule table by age, size and health
//!
//! ## Modules
//!
//! - [`store`]: Record store trait and backends (memory, file, browser)
//! - [`tracker`], [`vaccination`], [`profile`], [`mood`], [`food`]: command handlers
//! - [`view`]: Pure projections of state for display
//! - [`config`], [`logging`]: Ambient setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use woofwell::store::FileStore;
//! use woofwell::tracker::{toggle_task, Task};
//! use woofwell::vaccination::list_vaccinations;
//! use woofwell::view::{TrackerView, VaccinationListView};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = FileStore::open("./woofwell_data")?;
//!
//!     let state = toggle_task(&mut store, Task::Walk)?;
//!     println!("{}", TrackerView::from(&state));
//!
//!     let vaccinations = list_vaccinations(&mut store)?;
//!     println!("{}", VaccinationListView::new(&vaccinations, chrono::Utc::now()));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod food;
pub mod logging;
pub mod mood;
pub mod profile;
pub mod store;
pub mod tracker;
pub mod vaccination;
pub mod view;

// Re-export top-level types for convenience
pub use store::{
    FileStore, MemoryStore, RecordKey, RecordStore, RecordStoreExt, StoreError, StoreResult,
};

#[cfg(feature = "web")]
pub use store::LocalStorage;

pub use error::ParseError;

pub use tracker::{load_tracker, reset_tracker, set_task, toggle_task, Task, TrackerState};

pub use vaccination::{
    add_vaccination, list_vaccinations, remove_vaccination, NewVaccination, VaccinationRecord,
    VaccinationStatus,
};

pub use profile::{
    ensure_profile_seeded, load_profile, record_login, signup, Dog, LastLoginAttempt, Profile,
};

pub use mood::{current_mood, set_mood, Mood};

pub use food::{recommend, DogSize, FoodCard, FoodQuery, HealthNeed, LifeStage};

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};

//! Vaccination list
//!
//! An ordered list of vaccination entries, newest first. Entries are
//! addressed by their current display position, so indices shift after every
//! add or remove. Status is derived from the next-due date at render time.

use crate::error::ParseError;
use crate::store::{RecordKey, RecordStore, RecordStoreExt, StoreResult};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Entries due within this many days are flagged as upcoming
pub const DUE_SOON_DAYS: i64 = 30;

/// Date format used for `given` and `next`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single vaccination entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub name: String,
    /// Date administered, `YYYY-MM-DD`
    #[serde(default)]
    pub given: String,
    /// Next due date, `YYYY-MM-DD`, empty when unknown
    #[serde(default)]
    pub next: String,
}

/// Derived display status of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaccinationStatus {
    /// Due within the next [`DUE_SOON_DAYS`] days
    Upcoming,
    /// Next due date has passed
    Overdue,
    /// Not due soon, or no due date recorded
    Completed,
}

impl VaccinationStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            VaccinationStatus::Upcoming => "Upcoming",
            VaccinationStatus::Overdue => "Overdue",
            VaccinationStatus::Completed => "Completed",
        }
    }

    /// Whether the entry needs attention
    pub fn needs_attention(&self) -> bool {
        !matches!(self, VaccinationStatus::Completed)
    }
}

impl std::fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl VaccinationRecord {
    pub fn new(
        name: impl Into<String>,
        given: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            given: given.into(),
            next: next.into(),
        }
    }

    /// Next due date as UTC midnight, `None` if empty or unparseable
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::parse_from_str(self.next.trim(), DATE_FORMAT).ok()?;
        Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
    }

    /// Status relative to `now`
    ///
    /// Overdue when the due date has passed, upcoming when it falls within
    /// [`DUE_SOON_DAYS`], completed otherwise. Entries without a due date are
    /// completed.
    pub fn status_at(&self, now: DateTime<Utc>) -> VaccinationStatus {
        match self.next_due() {
            Some(due) if due < now => VaccinationStatus::Overdue,
            Some(due) if due < now + Duration::days(DUE_SOON_DAYS) => VaccinationStatus::Upcoming,
            _ => VaccinationStatus::Completed,
        }
    }
}

/// Form input for a new entry; blanks are filled in by [`NewVaccination::into_record`]
#[derive(Debug, Clone, Default)]
pub struct NewVaccination {
    pub name: Option<String>,
    pub given: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}

impl NewVaccination {
    /// Fill defaults: blank name becomes "Unnamed", missing given date is
    /// `today`, missing next date stays empty
    pub fn into_record(self, today: NaiveDate) -> VaccinationRecord {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unnamed".to_string());
        let given = self.given.unwrap_or(today).format(DATE_FORMAT).to_string();
        let next = self
            .next
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        VaccinationRecord { name, given, next }
    }
}

/// Parse a `YYYY-MM-DD` date, naming the field in the error
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Sample entries seeded on first access
pub fn default_vaccinations() -> Vec<VaccinationRecord> {
    vec![
        VaccinationRecord::new("Rabies", "2024-04-12", "2025-04-12"),
        VaccinationRecord::new("DHPP", "2023-10-01", "2024-10-01"),
    ]
}

/// Current list; seeds and persists the defaults when none is stored
pub fn list_vaccinations<S: RecordStore + ?Sized>(
    store: &mut S,
) -> StoreResult<Vec<VaccinationRecord>> {
    let stored: Option<Vec<VaccinationRecord>> = store.try_read(RecordKey::Vaccinations)?;
    if let Some(list) = stored {
        return Ok(list);
    }

    let defaults = default_vaccinations();
    store.write(RecordKey::Vaccinations, &defaults)?;
    tracing::info!("Seeded {} default vaccination entries", defaults.len());
    Ok(defaults)
}

/// Put a new entry at the front of the list
pub fn add_vaccination<S: RecordStore + ?Sized>(
    store: &mut S,
    record: VaccinationRecord,
) -> StoreResult<Vec<VaccinationRecord>> {
    let mut list = list_vaccinations(store)?;
    tracing::info!("Adding vaccination '{}' (next: {:?})", record.name, record.next);
    list.insert(0, record);
    store.write(RecordKey::Vaccinations, &list)?;
    Ok(list)
}

/// Remove the entry at display position `index`; out-of-range is a no-op
pub fn remove_vaccination<S: RecordStore + ?Sized>(
    store: &mut S,
    index: usize,
) -> StoreResult<Vec<VaccinationRecord>> {
    let mut list = list_vaccinations(store)?;
    if index >= list.len() {
        tracing::warn!(
            "Vaccination index {} out of range ({} entries), nothing removed",
            index,
            list.len()
        );
        return Ok(list);
    }

    let removed = list.remove(index);
    store.write(RecordKey::Vaccinations, &list)?;
    tracing::info!("Removed vaccination '{}' at {}", removed.name, index);
    Ok(list)
}

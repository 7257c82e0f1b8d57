//! Daily task tracker
//!
//! A fixed checklist of five tasks, each done or not done. The whole map is
//! persisted on every change; completion percentage and points are derived
//! on read and never stored.
//!
//! Stored form (`woofwell_tracker`):
//! ```json
//! {"taskFood":false,"taskGroom":false,"taskPlay":true,"taskWalk":true,"taskWater":false}
//! ```

use crate::error::ParseError;
use crate::store::{RecordKey, RecordStore, RecordStoreExt, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Points awarded per completed task
pub const POINTS_PER_TASK: u32 = 10;

/// One item of the daily checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    Walk,
    Play,
    Food,
    Water,
    Groom,
}

impl Task {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [Task] {
        &[Task::Walk, Task::Play, Task::Food, Task::Water, Task::Groom]
    }

    /// Identifier used as the key in the stored map
    pub const fn id(&self) -> &'static str {
        match self {
            Task::Walk => "taskWalk",
            Task::Play => "taskPlay",
            Task::Food => "taskFood",
            Task::Water => "taskWater",
            Task::Groom => "taskGroom",
        }
    }

    /// Short name accepted on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Task::Walk => "walk",
            Task::Play => "play",
            Task::Food => "food",
            Task::Water => "water",
            Task::Groom => "groom",
        }
    }

    /// Human-readable checklist label
    pub const fn label(&self) -> &'static str {
        match self {
            Task::Walk => "Walk",
            Task::Play => "Play time",
            Task::Food => "Meals",
            Task::Water => "Fresh water",
            Task::Groom => "Grooming",
        }
    }

    pub fn from_id(id: &str) -> Option<Task> {
        Task::all().iter().copied().find(|t| t.id() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Task {
    type Err = ParseError;

    /// Accepts the short name (`walk`) or the stored id (`taskWalk`), any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("task").unwrap_or(&lower);
        Task::all()
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| ParseError::UnknownTask(s.to_string()))
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Completion flags for all tasks
///
/// Serialized as a map from task id to bool. Missing ids read as not done and
/// unknown ids are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct TrackerState {
    done: [bool; Task::COUNT],
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self, task: Task) -> bool {
        self.done[task.index()]
    }

    /// Builder: mark one task
    pub fn with_task(mut self, task: Task, done: bool) -> Self {
        self.done[task.index()] = done;
        self
    }

    /// Copy with one task flipped
    pub fn toggled(self, task: Task) -> Self {
        let done = !self.is_done(task);
        self.with_task(task, done)
    }

    pub fn completed_count(&self) -> usize {
        self.done.iter().filter(|d| **d).count()
    }

    /// Completion percentage, rounded to the nearest whole number
    pub fn percent(&self) -> u8 {
        let ratio = self.completed_count() as f64 / Task::COUNT as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn points(&self) -> u32 {
        self.completed_count() as u32 * POINTS_PER_TASK
    }

    /// Tasks with their flags, in checklist order
    pub fn iter(&self) -> impl Iterator<Item = (Task, bool)> + '_ {
        Task::all().iter().map(move |t| (*t, self.is_done(*t)))
    }
}

impl From<BTreeMap<String, bool>> for TrackerState {
    fn from(map: BTreeMap<String, bool>) -> Self {
        let mut state = TrackerState::default();
        for (id, done) in map {
            match Task::from_id(&id) {
                Some(task) => state.done[task.index()] = done,
                None => tracing::debug!("Ignoring unknown tracker entry '{}'", id),
            }
        }
        state
    }
}

impl From<TrackerState> for BTreeMap<String, bool> {
    fn from(state: TrackerState) -> Self {
        state.iter().map(|(t, d)| (t.id().to_string(), d)).collect()
    }
}

/// Current checklist, all tasks open if nothing was saved
pub fn load_tracker<S: RecordStore + ?Sized>(store: &S) -> TrackerState {
    store.read(RecordKey::Tracker, TrackerState::default())
}

/// Checklist to modify; a failed backend read is an error, not an empty map
fn current_tracker<S: RecordStore + ?Sized>(store: &S) -> StoreResult<TrackerState> {
    Ok(store.try_read(RecordKey::Tracker)?.unwrap_or_default())
}

/// Flip one task and persist the full map
pub fn toggle_task<S: RecordStore + ?Sized>(store: &mut S, task: Task) -> StoreResult<TrackerState> {
    let state = current_tracker(&*store)?.toggled(task);
    store.write(RecordKey::Tracker, &state)?;
    tracing::debug!("Toggled {} -> {}", task.id(), state.is_done(task));
    Ok(state)
}

/// Set one task to an explicit value and persist the full map
pub fn set_task<S: RecordStore + ?Sized>(
    store: &mut S,
    task: Task,
    done: bool,
) -> StoreResult<TrackerState> {
    let state = current_tracker(&*store)?.with_task(task, done);
    store.write(RecordKey::Tracker, &state)?;
    tracing::debug!("Set {} -> {}", task.id(), done);
    Ok(state)
}

/// Clear every task; persists an empty map
pub fn reset_tracker<S: RecordStore + ?Sized>(store: &mut S) -> StoreResult<TrackerState> {
    store.write(RecordKey::Tracker, &BTreeMap::<String, bool>::new())?;
    tracing::info!("Tracker reset");
    Ok(TrackerState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::FlakyStore;
    use crate::store::MemoryStore;

    #[test]
    fn test_initial_state_all_open() {
        let store = MemoryStore::new();
        let state = load_tracker(&store);
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.percent(), 0);
        assert_eq!(state.points(), 0);
    }

    #[test]
    fn test_toggle_adds_one_task_and_ten_points() {
        let mut store = MemoryStore::new();
        let before = load_tracker(&store);

        let after = toggle_task(&mut store, Task::Walk).unwrap();
        assert!(after.is_done(Task::Walk));
        assert_eq!(after.completed_count(), before.completed_count() + 1);
        assert_eq!(after.points(), before.points() + 10);

        // Persisted, not just returned
        assert_eq!(load_tracker(&store), after);

        let back = toggle_task(&mut store, Task::Walk).unwrap();
        assert!(!back.is_done(Task::Walk));
        assert_eq!(back.points(), 0);
    }

    #[test]
    fn test_three_of_five_is_sixty_percent() {
        let state = TrackerState::new()
            .with_task(Task::Walk, true)
            .with_task(Task::Food, true)
            .with_task(Task::Groom, true);
        assert_eq!(state.completed_count(), 3);
        assert_eq!(state.percent(), 60);
        assert_eq!(state.points(), 30);

        let all = Task::all()
            .iter()
            .fold(TrackerState::new(), |s, t| s.with_task(*t, true));
        assert_eq!(all.percent(), 100);
        assert_eq!(all.points(), 50);
    }

    #[test]
    fn test_reset_clears_and_persists_empty_map() {
        let mut store = MemoryStore::new();
        set_task(&mut store, Task::Play, true).unwrap();
        set_task(&mut store, Task::Water, true).unwrap();

        let state = reset_tracker(&mut store).unwrap();
        assert_eq!(state.percent(), 0);
        assert_eq!(state.points(), 0);
        assert_eq!(
            store.get_item("woofwell_tracker").unwrap().as_deref(),
            Some("{}")
        );
        assert_eq!(load_tracker(&store), TrackerState::default());
    }

    #[test]
    fn test_toggle_persists_full_map() {
        let mut store = MemoryStore::new();
        toggle_task(&mut store, Task::Groom).unwrap();

        let raw: BTreeMap<String, bool> = store.read("woofwell_tracker", BTreeMap::new());
        assert_eq!(raw.len(), 5);
        assert_eq!(raw.get("taskGroom"), Some(&true));
        assert_eq!(raw.get("taskWalk"), Some(&false));
    }

    #[test]
    fn test_stored_map_tolerates_missing_and_unknown_ids() {
        let mut store = MemoryStore::new();
        store
            .set_item("woofwell_tracker", r#"{"taskWalk":true,"taskNap":true}"#)
            .unwrap();

        let state = load_tracker(&store);
        assert!(state.is_done(Task::Walk));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn test_corrupted_state_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.set_item("woofwell_tracker", "[1,2,3]").unwrap();
        assert_eq!(load_tracker(&store), TrackerState::default());
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let mut store = MemoryStore::with_quota(8);
        let err = toggle_task(&mut store, Task::Walk).unwrap_err();
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn test_read_failure_does_not_overwrite_state() {
        let mut store = FlakyStore::default();
        for task in [Task::Walk, Task::Play, Task::Food] {
            toggle_task(&mut store, task).unwrap();
        }

        store.fail_reads = true;
        assert!(toggle_task(&mut store, Task::Groom).is_err());
        assert!(set_task(&mut store, Task::Water, true).is_err());

        store.fail_reads = false;
        let state = load_tracker(&store);
        assert_eq!(state.completed_count(), 3);
        assert!(!state.is_done(Task::Groom));

        assert_eq!(toggle_task(&mut store, Task::Groom).unwrap().completed_count(), 4);
    }

    #[test]
    fn test_parse_task() {
        assert_eq!("walk".parse::<Task>().unwrap(), Task::Walk);
        assert_eq!("taskWater".parse::<Task>().unwrap(), Task::Water);
        assert_eq!(" GROOM ".parse::<Task>().unwrap(), Task::Groom);
        assert!("nap".parse::<Task>().is_err());
        assert_eq!(Task::from_id("taskPlay"), Some(Task::Play));
        assert_eq!(Task::from_id("play"), None);
    }
}

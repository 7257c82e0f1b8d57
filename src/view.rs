//! Views
//!
//! Pure projections of record state into display structs. Nothing here reads
//! or writes the store; callers load state, build a view and print it.

use crate::food::{FoodCard, FOOD_DISCLAIMER};
use crate::mood::Mood;
use crate::profile::{Profile, PLACEHOLDER};
use crate::tracker::{Task, TrackerState};
use crate::vaccination::{VaccinationRecord, VaccinationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

const PROGRESS_WIDTH: usize = 20;

/// Dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// e.g. "Fri, Oct 16"
    pub date: String,
    pub welcome: String,
    pub dog_name: String,
    /// "age • breed • size"
    pub details: String,
    pub mood: Option<String>,
}

impl DashboardView {
    pub fn new(profile: Option<&Profile>, mood: Option<&Mood>, today: NaiveDate) -> Self {
        let (welcome, dog_name, details) = match profile {
            Some(profile) => {
                let dog = profile.resolved_dog();
                let welcome = format!("Welcome, {}", dog.name.as_deref().unwrap_or("friend"));
                let dog_name = dog.name.unwrap_or_else(|| "Your dog".to_string());
                let details = [dog.age, dog.breed, dog.size].join(" • ");
                (welcome, dog_name, details)
            }
            None => (
                "Welcome".to_string(),
                "Your dog".to_string(),
                [PLACEHOLDER; 3].join(" • "),
            ),
        };

        Self {
            date: today.format("%a, %b %-d").to_string(),
            welcome,
            dog_name,
            details,
            mood: mood.map(|m| m.mood.clone()),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "{}", self.welcome)?;
        writeln!(f)?;
        writeln!(f, "{}", self.dog_name)?;
        writeln!(f, "{}", self.details)?;
        match &self.mood {
            Some(mood) => write!(f, "Mood: {}", mood),
            None => write!(f, "Mood: not set"),
        }
    }
}

/// Profile page card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub age: String,
    pub breed: String,
    pub size: String,
    pub favourite: String,
    pub email: Option<String>,
}

impl ProfileCard {
    pub fn new(profile: &Profile) -> Self {
        let dog = profile.resolved_dog();
        Self {
            name: dog.name.unwrap_or_else(|| PLACEHOLDER.to_string()),
            age: dog.age,
            breed: dog.breed,
            size: dog.size,
            favourite: dog.favourite,
            email: Some(profile.email.trim().to_string()).filter(|e| !e.is_empty()),
        }
    }
}

impl fmt::Display for ProfileCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Breed: {}", self.breed)?;
        writeln!(f, "Size: {}", self.size)?;
        write!(f, "Favourite: {}", self.favourite)?;
        if let Some(email) = &self.email {
            write!(f, "\nOwner: {}", email)?;
        }
        Ok(())
    }
}

/// Checklist with progress and points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerView {
    pub tasks: Vec<(Task, bool)>,
    pub percent: u8,
    pub points: u32,
}

impl From<&TrackerState> for TrackerView {
    fn from(state: &TrackerState) -> Self {
        Self {
            tasks: state.iter().collect(),
            percent: state.percent(),
            points: state.points(),
        }
    }
}

impl fmt::Display for TrackerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (task, done) in &self.tasks {
            let mark = if *done { "x" } else { " " };
            writeln!(f, "[{}] {:<12} ({})", mark, task.label(), task.name())?;
        }
        let filled = (self.percent as usize * PROGRESS_WIDTH / 100).min(PROGRESS_WIDTH);
        writeln!(
            f,
            "{}{} {}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled),
            self.percent
        )?;
        write!(f, "Points: {}", self.points)
    }
}

/// One vaccination row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationRow {
    pub index: usize,
    pub name: String,
    pub given: String,
    pub next: String,
    pub status: VaccinationStatus,
}

/// Vaccination list with statuses computed at `now`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationListView {
    pub rows: Vec<VaccinationRow>,
}

impl VaccinationListView {
    pub fn new(records: &[VaccinationRecord], now: DateTime<Utc>) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, r)| VaccinationRow {
                index,
                name: r.name.clone(),
                given: r.given.clone(),
                next: if r.next.is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    r.next.clone()
                },
                status: r.status_at(now),
            })
            .collect();
        Self { rows }
    }

    /// Number of rows that are overdue or upcoming
    pub fn attention_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status.needs_attention())
            .count()
    }
}

impl fmt::Display for VaccinationListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "No vaccinations recorded");
        }

        writeln!(
            f,
            "{:<4} {:<16} {:<12} {:<12} {}",
            "#", "Name", "Given", "Next", "Status"
        )?;
        write!(f, "{}", "-".repeat(58))?;
        for row in &self.rows {
            write!(
                f,
                "\n{:<4} {:<16} {:<12} {:<12} {}",
                row.index, row.name, row.given, row.next, row.status
            )?;
        }
        Ok(())
    }
}

/// Food suggestion cards plus the disclaimer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodView {
    pub cards: Vec<FoodCard>,
}

impl FoodView {
    pub fn new(cards: Vec<FoodCard>) -> Self {
        Self { cards }
    }
}

impl fmt::Display for FoodView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            writeln!(f, "{}", card.title)?;
            writeln!(f, "  {}", card.description)?;
            writeln!(f, "  {} • Ingredients: {}", card.price, card.ingredients)?;
            writeln!(f)?;
        }
        write!(f, "{}", FOOD_DISCLAIMER)
    }
}

//! Input parsing errors
//!
//! Raised when user-supplied text (task names, food options, dates) does not
//! name a known value. Storage failures live in [`crate::store::StoreError`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown task: {0} (expected walk, play, food, water or groom)")]
    UnknownTask(String),

    #[error("Unknown life stage: {0} (expected puppy, adult or senior)")]
    UnknownLifeStage(String),

    #[error("Unknown dog size: {0} (expected small, medium or large)")]
    UnknownSize(String),

    #[error("Unknown health need: {0} (expected normal or sensitive)")]
    UnknownHealth(String),

    #[error("Invalid {field} date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

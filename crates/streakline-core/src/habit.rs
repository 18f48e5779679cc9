//! Habits and their per-day completion records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum habit name length (characters, after trimming).
pub const MAX_NAME_LEN: usize = 100;

/// Maximum description length (characters).
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A tracked recurring behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Archived habits are hidden from listings and reject new check-ins.
    pub archived: bool,
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check name and description limits.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::TooLong`] when either field exceeds its limit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_NAME_LEN,
            });
        }
        if let Some(desc) = &self.description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::TooLong {
                    field: "description".to_string(),
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }
        Ok(())
    }
}

/// Outcome of one habit on one calendar day.
///
/// `(habit_id, date)` is the natural key: the store keeps at most one
/// record per pair and overwrites on re-report. A day with no record and a
/// day with `completed == false` both break a streak, but only `true`
/// records count as completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: impl Into<String>, date: NaiveDate, completed: bool) -> Self {
        Self {
            habit_id: habit_id.into(),
            date,
            completed,
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar day.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] naming `field` when the text is
/// not a valid date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("expected YYYY-MM-DD, got '{value}' ({e})"),
        }
    })
}

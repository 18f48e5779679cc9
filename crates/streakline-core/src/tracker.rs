//! Glue between stored completions, the clock and the streak calculator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{month_calendar, MonthCalendar};
use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::habit::{CompletionRecord, Habit};
use crate::storage::{CompletionSource, Database};
use crate::streak::{StreakCalculator, StreakSummary};

/// A habit paired with its streak figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStreak {
    pub habit_id: String,
    pub name: String,
    #[serde(flatten)]
    pub summary: StreakSummary,
}

/// Computes streaks for habits read from a [`CompletionSource`], as of the
/// day reported by a [`Clock`].
pub struct HabitTracker<S, C> {
    source: S,
    clock: C,
    calculator: StreakCalculator,
}

impl<S: CompletionSource, C: Clock> HabitTracker<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self::with_calculator(source, clock, StreakCalculator::new())
    }

    pub fn with_calculator(source: S, clock: C, calculator: StreakCalculator) -> Self {
        Self {
            source,
            clock,
            calculator,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Streak figures for one habit.
    ///
    /// # Errors
    /// Returns an error if the records cannot be read.
    pub fn streak(&self, habit_id: &str) -> Result<StreakSummary> {
        let records = self.source.completions_for(habit_id)?;
        let today = self.clock.today();
        let summary = self.calculator.calculate(&records, today);
        tracing::debug!(
            habit_id,
            %today,
            records = records.len(),
            current = summary.current_streak,
            longest = summary.longest_streak,
            "computed streak"
        );
        Ok(summary)
    }

    /// Streaks for every given habit, highest current streak first.
    ///
    /// Ties are broken by name so the order is stable.
    ///
    /// # Errors
    /// Returns an error if any habit's records cannot be read.
    pub fn all_streaks(&self, habits: &[Habit]) -> Result<Vec<HabitStreak>> {
        let mut results = habits
            .iter()
            .map(|habit| -> Result<HabitStreak> {
                Ok(HabitStreak {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    summary: self.streak(&habit.id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        results.sort_by(|a, b| {
            b.summary
                .current_streak
                .cmp(&a.summary.current_streak)
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::debug!(habits = results.len(), "computed all streaks");
        Ok(results)
    }

    /// Month view for one habit. Defaults to the current month.
    ///
    /// # Errors
    /// Returns an error for an invalid month or if records cannot be read.
    pub fn calendar(&self, habit_id: &str, month: Option<(i32, u32)>) -> Result<MonthCalendar> {
        use chrono::Datelike;

        let today = self.clock.today();
        let (year, month) = month.unwrap_or((today.year(), today.month()));
        let records = self.source.completions_for(habit_id)?;
        Ok(month_calendar(&records, year, month, today)?)
    }
}

impl<C: Clock> HabitTracker<&Database, C> {
    /// Record the outcome of a habit on `date` (today when `None`).
    ///
    /// # Errors
    /// Returns [`ValidationError::FutureDate`] for a day after today, or a
    /// storage error if the habit is unknown or archived.
    pub fn check_in(
        &self,
        habit_id: &str,
        date: Option<NaiveDate>,
        completed: bool,
    ) -> Result<CompletionRecord> {
        let today = self.clock.today();
        let date = date.unwrap_or(today);
        if date > today {
            tracing::warn!(habit_id, %date, %today, "rejected check-in for a future day");
            return Err(ValidationError::FutureDate { date, today }.into());
        }
        self.source.record_completion(habit_id, date, completed)
    }
}

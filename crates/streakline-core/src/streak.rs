//! Streak computation over sparse per-day completion records.
//!
//! Input is every [`CompletionRecord`] of one habit, in any order, plus the
//! calendar day the caller considers "today". Days are compared purely as
//! calendar dates, so month ends, leap days and DST shifts need no special
//! handling.
//!
//! The current streak treats an unreported today as still pending: if today
//! has no record at all the walk starts from yesterday. An explicit
//! `completed: false` for today decides the day and the current streak is 0.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::CompletionRecord;

/// Tuning for [`StreakCalculator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Hard cap on how many days the current-streak walk may step back.
    #[serde(default = "default_max_walk_days")]
    pub max_walk_days: u32,
}

fn default_max_walk_days() -> u32 {
    3650
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            max_walk_days: default_max_walk_days(),
        }
    }
}

/// Streak figures for one habit as of one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
    pub total_completions: u32,
    /// Latest day with a completed record.
    pub last_completed: Option<NaiveDate>,
}

/// Computes [`StreakSummary`] values. Pure; holds only configuration.
#[derive(Debug, Clone, Default)]
pub struct StreakCalculator {
    config: StreakConfig,
}

impl StreakCalculator {
    /// Create a new calculator with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom config.
    pub fn with_config(config: StreakConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    /// Compute streak figures for `records` as of `today`.
    ///
    /// Records are expected to share one `habit_id`; the id is not
    /// inspected. If the same date appears more than once the last record
    /// in input order wins, matching the store's overwrite semantics.
    pub fn calculate(&self, records: &[CompletionRecord], today: NaiveDate) -> StreakSummary {
        let days = by_day(records);

        // BTreeMap iteration is ascending, so this is already sorted.
        let completed: Vec<NaiveDate> = days
            .iter()
            .filter(|(_, done)| **done)
            .map(|(date, _)| *date)
            .collect();

        StreakSummary {
            current_streak: self.current_streak(&days, today, completed.len()),
            longest_streak: longest_run(&completed),
            completed_today: days.get(&today).copied().unwrap_or(false),
            total_completions: u32::try_from(completed.len()).unwrap_or(u32::MAX),
            last_completed: completed.last().copied(),
        }
    }

    fn current_streak(
        &self,
        days: &BTreeMap<NaiveDate, bool>,
        today: NaiveDate,
        completed_days: usize,
    ) -> u32 {
        let start = match days.get(&today) {
            Some(true) => today,
            Some(false) => return 0,
            None => match today.pred_opt() {
                Some(yesterday) => yesterday,
                None => return 0,
            },
        };

        // A run can never be longer than the number of completed days.
        let limit = (completed_days as u64)
            .saturating_add(1)
            .min(u64::from(self.config.max_walk_days));

        let mut streak = 0u32;
        let mut day = start;
        while u64::from(streak) < limit && days.get(&day) == Some(&true) {
            streak += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        streak
    }
}

/// Compute a summary with the default configuration.
pub fn calculate_streak(records: &[CompletionRecord], today: NaiveDate) -> StreakSummary {
    StreakCalculator::new().calculate(records, today)
}

/// Length of the longest run of consecutive days in ascending `dates`.
///
/// Duplicates are ignored; any gap larger than one day restarts the run.
pub fn longest_run(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        match pair[1].signed_duration_since(pair[0]).num_days() {
            0 => {}
            1 => {
                run += 1;
                longest = longest.max(run);
            }
            _ => run = 1,
        }
    }
    longest
}

fn by_day(records: &[CompletionRecord]) -> BTreeMap<NaiveDate, bool> {
    let mut days = BTreeMap::new();
    for record in records {
        days.insert(record.date, record.completed);
    }
    days
}

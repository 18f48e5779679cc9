//! Month calendar view of one habit's completion history.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::habit::CompletionRecord;

/// What happened on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Reported as done
    Completed,
    /// Reported as not done
    Missed,
    /// No report for a day that has already started
    Untracked,
    /// After today
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStats {
    /// Days with any record
    pub tracked_days: u32,
    pub completed_days: u32,
    /// Days of the month up to and including today
    pub elapsed_days: u32,
    /// Completed days as a percentage of elapsed days (0.0 - 100.0)
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub stats: MonthStats,
}

/// First and last day of a month.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for a month outside 1..=12 or a
/// year chrono cannot represent.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "month".to_string(),
        message: format!("{year:04}-{month:02} is not a valid month"),
    };

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;
    Ok((first, last))
}

/// Parse a `YYYY-MM` month.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] when the text is malformed.
pub fn parse_month(value: &str) -> Result<(i32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "month".to_string(),
        message: format!("expected YYYY-MM, got '{value}'"),
    };

    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    month_bounds(year, month)?;
    Ok((year, month))
}

/// Build the calendar for `year`-`month` from a habit's records.
///
/// Records outside the month are ignored.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for an invalid month.
pub fn month_calendar(
    records: &[CompletionRecord],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthCalendar, ValidationError> {
    let (first, last) = month_bounds(year, month)?;

    let by_date: HashMap<NaiveDate, bool> = records
        .iter()
        .filter(|r| r.date >= first && r.date <= last)
        .map(|r| (r.date, r.completed))
        .collect();

    let mut days = Vec::with_capacity(last.day() as usize);
    let mut completed_days = 0u32;
    let mut elapsed_days = 0u32;

    for date in first.iter_days().take_while(|d| *d <= last) {
        let status = if date > today {
            DayStatus::Future
        } else {
            elapsed_days += 1;
            match by_date.get(&date) {
                Some(true) => {
                    completed_days += 1;
                    DayStatus::Completed
                }
                Some(false) => DayStatus::Missed,
                None => DayStatus::Untracked,
            }
        };
        days.push(CalendarDay { date, status });
    }

    let completion_rate = if elapsed_days == 0 {
        0.0
    } else {
        f64::from(completed_days) / f64::from(elapsed_days) * 100.0
    };

    Ok(MonthCalendar {
        year,
        month,
        days,
        stats: MonthStats {
            tracked_days: by_date.len() as u32,
            completed_days,
            elapsed_days,
            completion_rate,
        },
    })
}

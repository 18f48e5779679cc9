pub mod calendar;
pub mod check;
pub mod config;
pub mod habit;
pub mod streak;

use chrono::NaiveDate;
use serde::Serialize;
use streakline_core::habit::parse_date;
use streakline_core::{Clock, Config, Database, FixedClock};

/// Config and database shared by every data command.
pub struct Context {
    pub config: Config,
    pub db: Database,
}

impl Context {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let db = Database::open()?;
        tracing::debug!(day_boundary = ?config.clock.day_boundary, "loaded config");
        Ok(Self { config, db })
    }

    /// Clock pinned to `--today` when given, otherwise the configured
    /// system clock's current day.
    pub fn clock(&self, today: Option<&str>) -> Result<FixedClock, Box<dyn std::error::Error>> {
        let today = match today {
            Some(value) => parse_date("today", value)?,
            None => self.config.clock().today(),
        };
        Ok(FixedClock(today))
    }

    pub fn print<T: Serialize>(&self, value: &T) -> Result<(), Box<dyn std::error::Error>> {
        let json = if self.config.output.pretty_json {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{json}");
        Ok(())
    }
}

pub fn parse_optional_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, Box<dyn std::error::Error>> {
    Ok(value.map(|v| parse_date(field, v)).transpose()?)
}

//! # Streakline Core Library
//!
//! This library provides the core business logic for the Streakline habit
//! tracker. All operations are available through the standalone CLI binary,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streaks**: a pure calculator over per-day completion records, with
//!   "today" injected by the caller
//! - **Storage**: SQLite-based habit and completion storage, TOML-based
//!   configuration
//! - **Calendar**: month views of a habit's history
//!
//! ## Key Components
//!
//! - [`StreakCalculator`]: current/longest streak computation
//! - [`HabitTracker`]: reads records and applies the calculator as of today
//! - [`Database`]: habit and completion persistence
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod clock;
pub mod error;
pub mod habit;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use calendar::{CalendarDay, DayStatus, MonthCalendar, MonthStats};
pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{CompletionRecord, Habit, NewHabit};
pub use storage::{CompletionSource, Config, Database};
pub use streak::{calculate_streak, StreakCalculator, StreakConfig, StreakSummary};
pub use tracker::{HabitStreak, HabitTracker};

//! Integration tests for the habit streak workflow.
//!
//! Tests the full path from recording completions in the database to
//! streak and calendar figures computed as of an injected day.

use chrono::{Duration, NaiveDate};
use streakline_core::{
    CompletionSource, Database, DayStatus, FixedClock, HabitTracker, NewHabit, StreakCalculator,
    StreakConfig,
};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
}

fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

#[test]
fn test_full_streak_workflow() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Practice piano")).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(today()));

    // Older run of five days, a two-day gap, then today and yesterday.
    for n in 4..=8 {
        tracker.check_in(&habit.id, Some(days_ago(n)), true).unwrap();
    }
    tracker.check_in(&habit.id, Some(days_ago(1)), true).unwrap();
    tracker.check_in(&habit.id, None, true).unwrap();

    let summary = tracker.streak(&habit.id).unwrap();
    assert_eq!(summary.current_streak, 2);
    assert_eq!(summary.longest_streak, 5);
    assert!(summary.completed_today);
    assert_eq!(summary.total_completions, 7);
    assert_eq!(summary.last_completed, Some(today()));
}

#[test]
fn test_overwriting_today_with_a_miss_zeroes_current_streak() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Cold shower")).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(today()));

    tracker.check_in(&habit.id, Some(days_ago(2)), true).unwrap();
    tracker.check_in(&habit.id, Some(days_ago(1)), true).unwrap();
    tracker.check_in(&habit.id, None, true).unwrap();
    assert_eq!(tracker.streak(&habit.id).unwrap().current_streak, 3);

    // Reporting again for the same day replaces the record.
    tracker.check_in(&habit.id, None, false).unwrap();
    let summary = tracker.streak(&habit.id).unwrap();
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.longest_streak, 2);
    assert!(!summary.completed_today);
    assert_eq!(db.completions_for(&habit.id).unwrap().len(), 3);
}

#[test]
fn test_clearing_today_restores_pending_streak() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Walk")).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(today()));

    tracker.check_in(&habit.id, Some(days_ago(1)), true).unwrap();
    tracker.check_in(&habit.id, None, false).unwrap();
    assert_eq!(tracker.streak(&habit.id).unwrap().current_streak, 0);

    assert!(db.clear_completion(&habit.id, today()).unwrap());
    assert_eq!(tracker.streak(&habit.id).unwrap().current_streak, 1);
}

#[test]
fn test_streak_across_new_year() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Write")).unwrap();
    let new_year = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(new_year));

    for n in 0..5 {
        tracker
            .check_in(&habit.id, Some(new_year - Duration::days(n)), true)
            .unwrap();
    }
    let summary = tracker.streak(&habit.id).unwrap();
    assert_eq!(summary.current_streak, 5);
    assert_eq!(summary.longest_streak, 5);
}

#[test]
fn test_custom_walk_horizon() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Meditate")).unwrap();
    for n in 0..20 {
        db.record_completion(&habit.id, days_ago(n), true).unwrap();
    }

    let calculator = StreakCalculator::with_config(StreakConfig { max_walk_days: 7 });
    let tracker = HabitTracker::with_calculator(&db, FixedClock(today()), calculator);
    let summary = tracker.streak(&habit.id).unwrap();
    assert_eq!(summary.current_streak, 7);
    assert_eq!(summary.longest_streak, 20);
}

#[test]
fn test_calendar_reads_stored_records() {
    let db = Database::open_memory().unwrap();
    let habit = db.create_habit(&NewHabit::new("Vitamins")).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(today()));

    tracker
        .check_in(&habit.id, Some(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()), true)
        .unwrap();
    tracker
        .check_in(&habit.id, Some(NaiveDate::from_ymd_opt(2024, 11, 2).unwrap()), false)
        .unwrap();

    let cal = tracker.calendar(&habit.id, Some((2024, 11))).unwrap();
    assert_eq!(cal.days.len(), 30);
    assert_eq!(cal.days[0].status, DayStatus::Completed);
    assert_eq!(cal.days[1].status, DayStatus::Missed);
    assert_eq!(cal.days[2].status, DayStatus::Untracked);
    assert_eq!(cal.days[20].status, DayStatus::Future);
    assert_eq!(cal.stats.elapsed_days, 20);
    assert_eq!(cal.stats.completed_days, 1);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streakline.db");

    let habit_id = {
        let db = Database::open_at(&path).unwrap();
        let habit = db.create_habit(&NewHabit::new("Read")).unwrap();
        db.record_completion(&habit.id, days_ago(1), true).unwrap();
        db.record_completion(&habit.id, today(), true).unwrap();
        habit.id
    };

    let db = Database::open_at(&path).unwrap();
    let tracker = HabitTracker::new(&db, FixedClock(today()));
    let summary = tracker.streak(&habit_id).unwrap();
    assert_eq!(summary.current_streak, 2);
    assert_eq!(db.get_habit(&habit_id).unwrap().name, "Read");
}

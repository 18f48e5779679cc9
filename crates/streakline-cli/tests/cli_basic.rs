//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify its JSON output.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_streakline"))
        .args(args)
        .env("STREAKLINE_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command that must succeed and parse its stdout as JSON.
fn run_json(data_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command {:?} failed: {}", args, stderr);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn add_habit(data_dir: &TempDir, name: &str) -> String {
    let habit = run_json(data_dir, &["habit", "add", name]);
    habit["id"].as_str().unwrap().to_string()
}

#[test]
fn test_habit_add_and_list() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Read");

    let habits = run_json(&dir, &["habit", "list"]);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["id"], id.as_str());
    assert_eq!(habits[0]["name"], "Read");
}

#[test]
fn test_habit_add_rejects_blank_name() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["habit", "add", "  "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_streak_with_gap_and_explicit_miss() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Run");

    for date in ["2024-05-06", "2024-05-07", "2024-05-09", "2024-05-10"] {
        run_json(&dir, &["check", "done", &id, "--date", date]);
    }
    run_json(&dir, &["check", "miss", &id, "--date", "2024-05-08"]);

    let streak = run_json(&dir, &["streak", "show", &id, "--today", "2024-05-10"]);
    assert_eq!(streak["current_streak"], 2);
    assert_eq!(streak["longest_streak"], 2);
    assert_eq!(streak["total_completions"], 4);
    assert_eq!(streak["completed_today"], true);
}

#[test]
fn test_streak_pending_today_counts_yesterday() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Stretch");
    run_json(&dir, &["check", "done", &id, "--date", "2024-05-09"]);

    let streak = run_json(&dir, &["streak", "show", &id, "--today", "2024-05-10"]);
    assert_eq!(streak["current_streak"], 1);
    assert_eq!(streak["completed_today"], false);
    assert_eq!(streak["last_completed"], "2024-05-09");
}

#[test]
fn test_check_clear_removes_record() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Floss");
    run_json(&dir, &["check", "done", &id, "--date", "2024-05-09"]);

    let cleared = run_json(&dir, &["check", "clear", &id, "--date", "2024-05-09"]);
    assert_eq!(cleared["removed"], true);

    let streak = run_json(&dir, &["streak", "show", &id, "--today", "2024-05-10"]);
    assert_eq!(streak["total_completions"], 0);
}

#[test]
fn test_check_rejects_unknown_habit() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["check", "done", "missing", "--date", "2024-01-01"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Habit not found"));
}

#[test]
fn test_check_rejects_future_date() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Journal");
    let (_, _, code) = run_cli(&dir, &["check", "done", &id, "--date", "2999-01-01"]);
    assert_ne!(code, 0);
}

#[test]
fn test_streak_all_orders_by_current_streak() {
    let dir = TempDir::new().unwrap();
    let short = add_habit(&dir, "Short");
    let long = add_habit(&dir, "Long");
    run_json(&dir, &["check", "done", &short, "--date", "2024-05-10"]);
    for date in ["2024-05-08", "2024-05-09", "2024-05-10"] {
        run_json(&dir, &["check", "done", &long, "--date", date]);
    }

    let all = run_json(&dir, &["streak", "all", "--today", "2024-05-10"]);
    let all = all.as_array().unwrap();
    assert_eq!(all[0]["name"], "Long");
    assert_eq!(all[0]["current_streak"], 3);
    assert_eq!(all[1]["name"], "Short");
}

#[test]
fn test_calendar_month_view() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Water");
    run_json(&dir, &["check", "done", &id, "--date", "2024-02-01"]);
    run_json(&dir, &["check", "miss", &id, "--date", "2024-02-02"]);

    let cal = run_json(
        &dir,
        &["calendar", &id, "--month", "2024-02", "--today", "2024-02-04"],
    );
    assert_eq!(cal["days"].as_array().unwrap().len(), 29);
    assert_eq!(cal["days"][0]["status"], "completed");
    assert_eq!(cal["days"][1]["status"], "missed");
    assert_eq!(cal["days"][2]["status"], "untracked");
    assert_eq!(cal["days"][4]["status"], "future");
    assert_eq!(cal["stats"]["elapsed_days"], 4);
}

#[test]
fn test_archived_habit_rejects_check_in() {
    let dir = TempDir::new().unwrap();
    let id = add_habit(&dir, "Old");
    run_json(&dir, &["habit", "archive", &id]);

    let (_, _, code) = run_cli(&dir, &["check", "done", &id, "--date", "2024-01-01"]);
    assert_ne!(code, 0);

    let listed = run_json(&dir, &["habit", "list"]);
    assert!(listed.as_array().unwrap().is_empty());
    let listed = run_json(&dir, &["habit", "list", "--all"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_get_set_reset() {
    let dir = TempDir::new().unwrap();

    let (stdout, _, code) = run_cli(&dir, &["config", "get", "clock.day_boundary"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "local");

    let (_, _, code) = run_cli(&dir, &["config", "set", "clock.day_boundary", "utc"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "clock.day_boundary"]);
    assert_eq!(stdout.trim(), "utc");

    let (_, _, code) = run_cli(&dir, &["config", "set", "streak.max_walk_days", "0"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(&dir, &["config", "get", "nope"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(&dir, &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "clock.day_boundary"]);
    assert_eq!(stdout.trim(), "local");
}

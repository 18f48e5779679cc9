//! Completion reporting commands for CLI.

use clap::Subcommand;
use streakline_core::habit::parse_date;
use streakline_core::HabitTracker;

use super::{parse_optional_date, Context};

#[derive(Subcommand)]
pub enum CheckAction {
    /// Mark a habit as done
    Done {
        /// Habit ID
        id: String,
        /// Day to record (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a habit as explicitly not done
    Miss {
        /// Habit ID
        id: String,
        /// Day to record (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the report for a day
    Clear {
        /// Habit ID
        id: String,
        /// Day to clear (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
}

pub fn run(action: CheckAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    let tracker = HabitTracker::new(&ctx.db, ctx.clock(None)?);

    match action {
        CheckAction::Done { id, date } => {
            let date = parse_optional_date("date", date.as_deref())?;
            let record = tracker.check_in(&id, date, true)?;
            ctx.print(&record)?;
        }
        CheckAction::Miss { id, date } => {
            let date = parse_optional_date("date", date.as_deref())?;
            let record = tracker.check_in(&id, date, false)?;
            ctx.print(&record)?;
        }
        CheckAction::Clear { id, date } => {
            let date = parse_date("date", &date)?;
            ctx.db.get_habit(&id)?;
            let removed = ctx.db.clear_completion(&id, date)?;
            ctx.print(&serde_json::json!({
                "habit_id": id,
                "date": date,
                "removed": removed,
            }))?;
        }
    }
    Ok(())
}

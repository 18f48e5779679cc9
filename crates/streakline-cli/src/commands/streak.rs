use clap::Subcommand;
use streakline_core::{HabitTracker, StreakCalculator};

use super::Context;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Streak for one habit
    Show {
        /// Habit ID
        id: String,
        /// Compute as of this day (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Streaks for every habit, longest current streak first
    All {
        /// Compute as of this day (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,
        /// Include archived habits
        #[arg(long)]
        archived: bool,
    },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    let calculator = StreakCalculator::with_config(ctx.config.streak.clone());

    match action {
        StreakAction::Show { id, today } => {
            let habit = ctx.db.get_habit(&id)?;
            let tracker =
                HabitTracker::with_calculator(&ctx.db, ctx.clock(today.as_deref())?, calculator);
            let summary = tracker.streak(&habit.id)?;
            ctx.print(&serde_json::json!({
                "habit_id": habit.id,
                "name": habit.name,
                "today": tracker.today(),
                "current_streak": summary.current_streak,
                "longest_streak": summary.longest_streak,
                "completed_today": summary.completed_today,
                "total_completions": summary.total_completions,
                "last_completed": summary.last_completed,
            }))?;
        }
        StreakAction::All { today, archived } => {
            let tracker =
                HabitTracker::with_calculator(&ctx.db, ctx.clock(today.as_deref())?, calculator);
            let habits = ctx.db.list_habits(archived)?;
            let streaks = tracker.all_streaks(&habits)?;
            ctx.print(&streaks)?;
        }
    }
    Ok(())
}

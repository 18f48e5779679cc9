//! Habit management commands for CLI.

use clap::Subcommand;
use streakline_core::NewHabit;

use super::Context;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
    },
    /// Get habit details
    Get {
        /// Habit ID
        id: String,
    },
    /// Hide a habit and stop accepting check-ins for it
    Archive {
        /// Habit ID
        id: String,
    },
    /// Restore an archived habit
    Unarchive {
        /// Habit ID
        id: String,
    },
    /// Delete a habit and its whole history
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;

    match action {
        HabitAction::Add { name, description } => {
            let new = NewHabit { name, description };
            let habit = ctx.db.create_habit(&new)?;
            ctx.print(&habit)?;
        }
        HabitAction::List { all } => {
            let habits = ctx.db.list_habits(all)?;
            ctx.print(&habits)?;
        }
        HabitAction::Get { id } => {
            let habit = ctx.db.get_habit(&id)?;
            ctx.print(&habit)?;
        }
        HabitAction::Archive { id } => {
            ctx.db.set_archived(&id, true)?;
            ctx.print(&ctx.db.get_habit(&id)?)?;
        }
        HabitAction::Unarchive { id } => {
            ctx.db.set_archived(&id, false)?;
            ctx.print(&ctx.db.get_habit(&id)?)?;
        }
        HabitAction::Delete { id } => {
            ctx.db.delete_habit(&id)?;
            eprintln!("Habit deleted: {id}");
        }
    }
    Ok(())
}

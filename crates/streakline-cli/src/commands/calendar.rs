use clap::Args;
use streakline_core::calendar::parse_month;
use streakline_core::HabitTracker;

use super::Context;

#[derive(Args)]
pub struct CalendarArgs {
    /// Habit ID
    id: String,
    /// Month to show (YYYY-MM, default: current month)
    #[arg(long)]
    month: Option<String>,
    /// Treat this day as today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,
}

pub fn run(args: CalendarArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open()?;
    let habit = ctx.db.get_habit(&args.id)?;
    let month = args.month.as_deref().map(parse_month).transpose()?;

    let tracker = HabitTracker::new(&ctx.db, ctx.clock(args.today.as_deref())?);
    let calendar = tracker.calendar(&habit.id, month)?;
    ctx.print(&calendar)?;
    Ok(())
}

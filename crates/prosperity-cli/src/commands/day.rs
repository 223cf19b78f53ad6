//! Day lifecycle commands: rollover, end of day, morning ritual.

use clap::Subcommand;

use super::open_store;

#[derive(Subcommand)]
pub enum DayAction {
    /// Run the day rollover if the calendar day has changed
    Init,
    /// Snapshot today into history and mark the day ended
    End {
        /// Note attached to today's record
        #[arg(long)]
        note: Option<String>,
    },
    /// Mark the morning ritual done for today
    Ritual,
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    // open_store already ran the rollover; Init only reports the outcome.
    let mut store = open_store()?;

    match action {
        DayAction::Init => {
            let user = &store.document().user;
            println!(
                "Active day: {} (streak {}, best {})",
                user.last_active, user.streak, user.best_streak
            );
        }
        DayAction::End { note } => {
            store.end_day(note.as_deref())?;
            let unlocked = store.check_milestones()?;
            if let Some(record) = store.document().user.history.last() {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
            for title in unlocked {
                println!("Milestone unlocked: {title}");
            }
        }
        DayAction::Ritual => {
            store.complete_morning_ritual()?;
            println!(
                "Morning ritual done for {}",
                store.document().user.morning_ritual_date
            );
        }
    }
    Ok(())
}

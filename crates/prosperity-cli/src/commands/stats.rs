//! Progression statistics commands for CLI.

use clap::Subcommand;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Current XP, level, streak and lifetime counters
    Summary,
    /// Daily history ledger
    History {
        /// Only the most recent N days
        #[arg(long)]
        last: Option<usize>,
    },
    /// Adjust XP by a signed delta (bonus or penalty)
    AddXp {
        /// XP delta, may be negative
        delta: i64,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        StatsAction::Summary => {
            let user = &store.document().user;
            println!("{}", serde_json::to_string_pretty(user)?);
        }
        StatsAction::History { last } => {
            let history = &store.document().user.history;
            let skip = last.map_or(0, |n| history.len().saturating_sub(n));
            println!("{}", serde_json::to_string_pretty(&history[skip..])?);
        }
        StatsAction::AddXp { delta } => {
            store.add_xp(delta)?;
            let unlocked = store.check_milestones()?;
            let user = &store.document().user;
            println!("XP: {} (level {})", user.xp, user.level);
            for title in unlocked {
                println!("Milestone unlocked: {title}");
            }
        }
    }
    Ok(())
}

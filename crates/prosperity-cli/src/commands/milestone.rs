//! Milestone commands for CLI.

use clap::Subcommand;

use super::open_store;

#[derive(Subcommand)]
pub enum MilestoneAction {
    /// List the milestone catalog with unlock state
    List,
    /// Evaluate thresholds and unlock any newly-reached milestones
    Check,
}

pub fn run(action: MilestoneAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        MilestoneAction::List => {
            for m in &store.document().milestones {
                let state = match m.unlocked_at {
                    Some(at) => format!("unlocked {}", at.format("%Y-%m-%d")),
                    None => "locked".to_string(),
                };
                println!("{}  [{state}]  {} - {}", m.id, m.title, m.description);
            }
        }
        MilestoneAction::Check => {
            let unlocked = store.check_milestones()?;
            if unlocked.is_empty() {
                println!("No new milestones");
            }
            for title in unlocked {
                println!("Milestone unlocked: {title}");
            }
        }
    }
    Ok(())
}

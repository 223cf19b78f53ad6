//! Objective management commands for CLI.

use clap::Subcommand;
use prosperity_core::{Objective, ObjectiveKind};

use super::open_store;

#[derive(Subcommand)]
pub enum ObjectiveAction {
    /// List objectives with derived progress
    List,
    /// Add a new objective
    Add {
        /// Objective title
        title: String,
        /// Horizon: daily, weekly, monthly or life
        #[arg(long, default_value = "weekly")]
        kind: String,
        /// Numeric goal
        #[arg(long)]
        target: f64,
        /// Unit label (e.g. km, books)
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// Set an objective's current progress value
    Progress {
        /// Objective ID
        id: String,
        /// New current value
        current: f64,
    },
    /// Remove an objective
    Remove {
        /// Objective ID
        id: String,
    },
}

fn parse_kind(s: &str) -> Result<ObjectiveKind, Box<dyn std::error::Error>> {
    match s {
        "daily" => Ok(ObjectiveKind::Daily),
        "weekly" => Ok(ObjectiveKind::Weekly),
        "monthly" => Ok(ObjectiveKind::Monthly),
        "life" => Ok(ObjectiveKind::Life),
        other => Err(format!("unknown objective kind: {other}").into()),
    }
}

pub fn run(action: ObjectiveAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        ObjectiveAction::List => {
            for objective in &store.document().objectives {
                println!(
                    "{}  {:>5.1}%  {} ({:.1}/{:.1} {})",
                    objective.id,
                    objective.progress_percent(),
                    objective.title,
                    objective.current,
                    objective.target,
                    objective.unit,
                );
            }
        }
        ObjectiveAction::Add {
            title,
            kind,
            target,
            unit,
        } => {
            let objective = Objective::new(title, parse_kind(&kind)?, target, unit);
            let id = objective.id.clone();
            store.add_objective(objective)?;
            println!("Objective created: {id}");
        }
        ObjectiveAction::Progress { id, current } => {
            store.update_objective_progress(&id, current)?;
            println!("Objective updated: {id}");
        }
        ObjectiveAction::Remove { id } => {
            store.remove_objective(&id)?;
            println!("Objective removed: {id}");
        }
    }
    Ok(())
}

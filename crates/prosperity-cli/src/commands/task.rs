//! Task management commands for CLI.

use clap::Subcommand;
use prosperity_core::{TaskCategory, TaskUpdate};

use super::open_store;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks with today's status
    List,
    /// Add a new recurring task
    Add {
        /// Task title
        title: String,
        /// Category: core, technical, expansion, passive, spiritual or strategic
        #[arg(long, default_value = "core")]
        category: String,
        /// XP awarded on completion
        #[arg(long, default_value = "50")]
        xp: u32,
    },
    /// Toggle a task between pending and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Update a task's editable fields
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New XP reward
        #[arg(long)]
        xp: Option<u32>,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
}

fn parse_category(s: &str) -> Result<TaskCategory, Box<dyn std::error::Error>> {
    match s {
        "core" => Ok(TaskCategory::Core),
        "technical" => Ok(TaskCategory::Technical),
        "expansion" => Ok(TaskCategory::Expansion),
        "passive" => Ok(TaskCategory::Passive),
        "spiritual" => Ok(TaskCategory::Spiritual),
        "strategic" => Ok(TaskCategory::Strategic),
        other => Err(format!("unknown category: {other}").into()),
    }
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&store.document().tasks)?);
        }
        TaskAction::Add {
            title,
            category,
            xp,
        } => {
            let category = parse_category(&category)?;
            let id = store.add_task(title, category, xp)?;
            println!("Task created: {id}");
        }
        TaskAction::Toggle { id } => {
            if store.toggle_task(&id)? {
                let unlocked = store.check_milestones()?;
                let task = store.document().tasks.iter().find(|t| t.id == id);
                if let Some(task) = task {
                    println!("{}", serde_json::to_string_pretty(task)?);
                }
                for title in unlocked {
                    println!("Milestone unlocked: {title}");
                }
            } else {
                println!("No task with id {id}");
            }
        }
        TaskAction::Update {
            id,
            title,
            category,
            xp,
        } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            store.update_task(
                &id,
                TaskUpdate {
                    title,
                    category,
                    xp_reward: xp,
                },
            )?;
            println!("Task updated: {id}");
        }
        TaskAction::Remove { id } => {
            store.remove_task(&id)?;
            println!("Task removed: {id}");
        }
    }
    Ok(())
}

//! Settings commands for CLI.

use clap::Subcommand;
use prosperity_core::SettingsUpdate;

use super::open_store;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Update one or more settings
    Set {
        /// Enable or disable sounds
        #[arg(long)]
        sound: Option<bool>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
        /// Pomodoro work duration in minutes
        #[arg(long)]
        work: Option<u32>,
        /// Pomodoro short break in minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Pomodoro long break in minutes
        #[arg(long)]
        long_break: Option<u32>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        SettingsAction::Show => {
            println!(
                "{}",
                serde_json::to_string_pretty(&store.document().settings)?
            );
        }
        SettingsAction::Set {
            sound,
            notifications,
            work,
            short_break,
            long_break,
        } => {
            store.update_settings(SettingsUpdate {
                sound_enabled: sound,
                notifications_enabled: notifications,
                pomodoro_work: work,
                pomodoro_short_break: short_break,
                pomodoro_long_break: long_break,
            })?;
            println!(
                "{}",
                serde_json::to_string_pretty(&store.document().settings)?
            );
        }
    }
    Ok(())
}

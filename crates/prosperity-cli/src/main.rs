use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "prosperity-cli", version, about = "Prosperity CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Objective management
    Objective {
        #[command(subcommand)]
        action: commands::objective::ObjectiveAction,
    },
    /// Day lifecycle (rollover, end of day, morning ritual)
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Milestone catalog and unlock checks
    Milestone {
        #[command(subcommand)]
        action: commands::milestone::MilestoneAction,
    },
    /// Progression statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Objective { action } => commands::objective::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Milestone { action } => commands::milestone::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod db;
mod remote;
mod sync;

use commands::{
    ConfigCommand, GoalCommand, GoalSubcommand, MealCommand, MealSubcommand, MeasureCommand,
    MeasureSubcommand, ProfileCommand, ProfileSubcommand, StepsCommand, StepsSubcommand,
    SyncCommand, WeightCommand, WeightSubcommand, WorkoutCommand, WorkoutSubcommand,
};
use config::Config;
use sync::{try_auto_sync, Managers};

#[derive(Parser)]
#[command(name = "fitsync")]
#[command(version)]
#[command(about = "An offline-first fitness tracking CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage gym profiles
    Profile(ProfileCommand),

    /// Log and track body weight
    Weight(WeightCommand),

    /// Log and track tape measurements
    Measure(MeasureCommand),

    /// Manage the weight goal
    Goal(GoalCommand),

    /// Log and track meals
    Meal(MealCommand),

    /// Log and track workout sessions
    Workout(WorkoutCommand),

    /// Record daily step counts
    Steps(StepsCommand),

    /// Sync with remote server
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let pool = db::init_db(config.database_path.value.clone()).await?;
    let managers = Managers::new(&pool, &config.sync);

    let result = execute_command(&cli.command, &managers, &config).await;

    // Auto-sync AFTER write commands (only if the command succeeded), so
    // offline work reaches the server without waiting for the next list.
    // Reads need no pre-sync: listing a collection reconciles it already.
    if result.is_ok() && is_write_command(&cli.command) {
        try_auto_sync(&config, &managers).await;
    }

    result
}

async fn execute_command(
    command: &Commands,
    managers: &Managers,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Profile(cmd) => cmd.run(managers, config).await,
        Commands::Weight(cmd) => cmd.run(managers, config).await,
        Commands::Measure(cmd) => cmd.run(managers, config).await,
        Commands::Goal(cmd) => cmd.run(managers, config).await,
        Commands::Meal(cmd) => cmd.run(managers, config).await,
        Commands::Workout(cmd) => cmd.run(managers, config).await,
        Commands::Steps(cmd) => cmd.run(managers, config).await,
        Commands::Sync(cmd) => cmd.run(managers, config).await,
        Commands::Config(cmd) => cmd.run(config),
    }
}

/// Returns true if the command mutated data and should sync afterwards.
fn is_write_command(command: &Commands) -> bool {
    match command {
        Commands::Profile(p) => !matches!(p.command, ProfileSubcommand::List { .. }),
        Commands::Weight(w) => !matches!(w.command, WeightSubcommand::List { .. }),
        Commands::Measure(m) => !matches!(m.command, MeasureSubcommand::List { .. }),
        Commands::Goal(g) => !matches!(g.command, GoalSubcommand::Show { .. }),
        Commands::Meal(m) => !matches!(m.command, MealSubcommand::List { .. }),
        Commands::Workout(w) => !matches!(w.command, WorkoutSubcommand::List { .. }),
        Commands::Steps(s) => !matches!(s.command, StepsSubcommand::List { .. }),
        Commands::Sync(_) | Commands::Config(_) => false,
    }
}

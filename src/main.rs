use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ClearCommand, ConfigCommand, ExerciseCommand, ExportCommand, HistoryCommand, SetCommand,
    WorkoutCommand,
};
use config::Config;
use liftlog_core::{FileBackend, Session, UuidIds};

#[derive(Parser)]
#[command(name = "lift")]
#[command(version)]
#[command(about = "A strength training log", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workouts
    Workout(WorkoutCommand),

    /// Manage exercises within a workout
    Exercise(ExerciseCommand),

    /// Log and edit sets
    Set(SetCommand),

    /// Show past workouts with totals
    History(HistoryCommand),

    /// Export all data as JSON
    Export(ExportCommand),

    /// Delete all workout data
    Clear(ClearCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Bare levels apply to this binary and the core library only.
fn log_filter(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("liftlog={level},liftlog_core={level}")
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(&config.log_level.value).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config, cli.config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    tracing::debug!("Data directory: {}", config.data_dir.value.display());
    let backend = Arc::new(FileBackend::new(config.data_dir.value.clone()));
    let mut session = Session::start(backend, UuidIds).await;
    if let Some(e) = &session.report().error {
        eprintln!("Warning: storage could not be initialized: {}", e);
    }

    let result = match command {
        Commands::Workout(cmd) => cmd.run(&mut session, &config),
        Commands::Exercise(cmd) => cmd.run(&mut session),
        Commands::Set(cmd) => cmd.run(&mut session, &config),
        Commands::History(cmd) => cmd.run(&session, &config),
        Commands::Export(cmd) => cmd.run(&session),
        Commands::Clear(cmd) => cmd.run(&mut session),
        Commands::Config(_) => Ok(()),
    };

    // Persist whatever succeeded before reporting a command error
    session.close().await?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter("debug"), "liftlog=debug,liftlog_core=debug");
        assert_eq!(log_filter("liftlog_core=trace"), "liftlog_core=trace");
    }
}

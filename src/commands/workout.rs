use clap::{Args, Subcommand};

use super::{confirm, position_index, resolve_workout, CommandResult, OutputFormat};
use crate::config::Config;
use liftlog_core::{Session, Workout};

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Create a new workout
    Add {
        /// Name of the workout
        name: String,
    },

    /// List workouts in their saved order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a workout with its exercises and sets
    Show {
        /// Workout ID or name
        workout: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rename a workout
    Rename {
        /// Workout ID or name
        workout: String,

        /// New name
        name: String,
    },

    /// Delete a workout and everything in it
    Delete {
        /// Workout ID or name
        workout: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Move a workout to a new position (1 = first)
    Move {
        /// Workout ID or name
        workout: String,

        /// New position
        position: usize,
    },
}

impl WorkoutCommand {
    pub fn run(&self, session: &mut Session, config: &Config) -> CommandResult {
        let store = session.store_mut();

        match &self.command {
            WorkoutSubcommand::Add { name } => {
                let id = store.create_workout(name)?;
                if let Some(workout) = store.get_workout(&id) {
                    println!("Created workout {}:", id);
                    println!("{}", workout);
                }
                Ok(())
            }

            WorkoutSubcommand::List { format } => {
                let workouts = store.workouts();
                if workouts.is_empty() {
                    println!("No workouts yet");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(workouts)?);
                    }
                    OutputFormat::Text => print_table(workouts),
                }
                Ok(())
            }

            WorkoutSubcommand::Show { workout, format } => {
                let id = resolve_workout(store, workout)?;
                let workout = store
                    .get_workout(&id)
                    .ok_or_else(|| format!("Workout not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(workout)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", workout);
                        println!("Weights in {}", config.weight_unit.value);
                    }
                }
                Ok(())
            }

            WorkoutSubcommand::Rename { workout, name } => {
                let id = resolve_workout(store, workout)?;
                let mut renamed = store
                    .get_workout(&id)
                    .cloned()
                    .ok_or_else(|| format!("Workout not found: {}", id))?;
                renamed.name = name.clone();
                store.update_workout(renamed)?;
                println!("Renamed workout {} to '{}'", id, name.trim());
                Ok(())
            }

            WorkoutSubcommand::Delete { workout, force } => {
                let id = resolve_workout(store, workout)?;
                let name = store
                    .get_workout(&id)
                    .map(|w| w.name.clone())
                    .unwrap_or_default();

                if !force
                    && !confirm(&format!("Delete workout '{}' and all its exercises?", name))?
                {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete_workout(&id)?;
                println!("Deleted workout '{}'", name);
                Ok(())
            }

            WorkoutSubcommand::Move { workout, position } => {
                let id = resolve_workout(store, workout)?;
                store.move_workout(&id, position_index(*position)?)?;
                println!("Moved workout {} to position {}", id, position);
                Ok(())
            }
        }
    }
}

fn print_table(workouts: &[Workout]) {
    println!("{:<4}  {:<36}  {:<24}  {:>9}  DATE", "#", "ID", "NAME", "EXERCISES");
    println!("{}", "-".repeat(90));
    for (i, workout) in workouts.iter().enumerate() {
        let name = if workout.name.chars().count() > 24 {
            format!("{}...", workout.name.chars().take(21).collect::<String>())
        } else {
            workout.name.clone()
        };
        let date = workout
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4}  {:<36}  {:<24}  {:>9}  {}",
            i + 1,
            workout.id,
            name,
            workout.exercises.len(),
            date
        );
    }
    println!("\nTotal: {} workout(s)", workouts.len());
}

use clap::{Args, Subcommand};

use super::{
    confirm, position_index, resolve_exercise, resolve_workout, CommandResult, OutputFormat,
};
use liftlog_core::Session;

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Add an exercise to the end of a workout
    Add {
        /// Workout ID or name
        workout: String,

        /// Name of the exercise
        name: String,
    },

    /// Show an exercise and its sets
    Show {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rename an exercise
    Rename {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// New name
        name: String,
    },

    /// Delete an exercise and its sets
    Delete {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Move an exercise to a new position within its workout (1 = first)
    Move {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// New position
        position: usize,
    },
}

impl ExerciseCommand {
    pub fn run(&self, session: &mut Session) -> CommandResult {
        let store = session.store_mut();

        match &self.command {
            ExerciseSubcommand::Add { workout, name } => {
                let workout_id = resolve_workout(store, workout)?;
                let id = store.create_exercise(&workout_id, name)?;
                println!("Added exercise '{}' ({})", name.trim(), id);
                Ok(())
            }

            ExerciseSubcommand::Show {
                workout,
                exercise,
                format,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let exercise = store
                    .get_exercise(&workout_id, &exercise_id)
                    .ok_or_else(|| format!("Exercise not found: {}", exercise_id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(exercise)?);
                    }
                    OutputFormat::Text => print!("{}", exercise),
                }
                Ok(())
            }

            ExerciseSubcommand::Rename {
                workout,
                exercise,
                name,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let mut renamed = store
                    .get_exercise(&workout_id, &exercise_id)
                    .cloned()
                    .ok_or_else(|| format!("Exercise not found: {}", exercise_id))?;
                renamed.name = name.clone();
                store.update_exercise(&workout_id, renamed)?;
                println!("Renamed exercise {} to '{}'", exercise_id, name.trim());
                Ok(())
            }

            ExerciseSubcommand::Delete {
                workout,
                exercise,
                force,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let name = store
                    .get_exercise(&workout_id, &exercise_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();

                if !force
                    && !confirm(&format!("Delete exercise '{}' and its sets?", name))?
                {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete_exercise(&workout_id, &exercise_id)?;
                println!("Deleted exercise '{}'", name);
                Ok(())
            }

            ExerciseSubcommand::Move {
                workout,
                exercise,
                position,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                store.move_exercise(&workout_id, &exercise_id, position_index(*position)?)?;
                println!("Moved exercise {} to position {}", exercise_id, position);
                Ok(())
            }
        }
    }
}

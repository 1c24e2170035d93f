use clap::{Args, Subcommand};

use super::{resolve_exercise, resolve_set, resolve_workout, CommandResult};
use crate::config::Config;
use liftlog_core::{Session, SetInput, WorkoutSet};

#[derive(Args)]
pub struct SetCommand {
    #[command(subcommand)]
    pub command: SetSubcommand,
}

#[derive(Subcommand)]
pub enum SetSubcommand {
    /// Record a set
    Add {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// Weight lifted
        weight: String,

        /// Repetitions
        reps: String,
    },

    /// Change the weight and/or reps of a set
    Update {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// Set ID or position (1 = first)
        set: String,

        /// New weight
        #[arg(long)]
        weight: Option<String>,

        /// New repetitions
        #[arg(long)]
        reps: Option<String>,
    },

    /// Delete a set
    Delete {
        /// Workout ID or name
        workout: String,

        /// Exercise ID or name
        exercise: String,

        /// Set ID or position (1 = first)
        set: String,
    },
}

impl SetCommand {
    pub fn run(&self, session: &mut Session, config: &Config) -> CommandResult {
        let store = session.store_mut();
        let unit = &config.weight_unit.value;

        match &self.command {
            SetSubcommand::Add {
                workout,
                exercise,
                weight,
                reps,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let input = SetInput::parse(weight, reps)?;
                store.create_set(&workout_id, &exercise_id, input)?;
                println!(
                    "Logged {} {} x {} reps",
                    input.weight(),
                    unit,
                    input.reps()
                );
                Ok(())
            }

            SetSubcommand::Update {
                workout,
                exercise,
                set,
                weight,
                reps,
            } => {
                if weight.is_none() && reps.is_none() {
                    return Err("Nothing to update. Pass --weight and/or --reps.".into());
                }

                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let set_id = resolve_set(store, &workout_id, &exercise_id, set)?;
                let current = store
                    .get_set(&workout_id, &exercise_id, &set_id)
                    .ok_or_else(|| format!("Set not found: {}", set_id))?;

                let input = SetInput::parse(
                    weight
                        .as_deref()
                        .unwrap_or(&current.weight.to_string()),
                    reps.as_deref().unwrap_or(&current.reps.to_string()),
                )?;
                store.update_set(
                    &workout_id,
                    &exercise_id,
                    WorkoutSet::new(set_id, input.weight(), input.reps()),
                )?;
                println!(
                    "Updated set to {} {} x {} reps",
                    input.weight(),
                    unit,
                    input.reps()
                );
                Ok(())
            }

            SetSubcommand::Delete {
                workout,
                exercise,
                set,
            } => {
                let workout_id = resolve_workout(store, workout)?;
                let exercise_id = resolve_exercise(store, &workout_id, exercise)?;
                let set_id = resolve_set(store, &workout_id, &exercise_id, set)?;
                store.delete_set(&workout_id, &exercise_id, &set_id)?;
                println!("Deleted set {}", set_id);
                Ok(())
            }
        }
    }
}

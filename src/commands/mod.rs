mod clear;
mod config_cmd;
mod exercise;
mod export;
mod history;
mod set;
mod workout;

pub use clear::ClearCommand;
pub use config_cmd::ConfigCommand;
pub use exercise::ExerciseCommand;
pub use export::ExportCommand;
pub use history::HistoryCommand;
pub use set::SetCommand;
pub use workout::WorkoutCommand;

use clap::ValueEnum;
use std::io::{self, Write};

use liftlog_core::{EntityId, Store};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Finds a workout by ID, falling back to a case-insensitive name match.
pub fn resolve_workout(store: &Store, identifier: &str) -> Result<EntityId, String> {
    store
        .workouts()
        .iter()
        .find(|w| w.id.as_str() == identifier)
        .or_else(|| {
            store
                .workouts()
                .iter()
                .find(|w| w.name.eq_ignore_ascii_case(identifier))
        })
        .map(|w| w.id.clone())
        .ok_or_else(|| format!("Workout not found: {}", identifier))
}

/// Finds an exercise within a workout by ID or name.
pub fn resolve_exercise(
    store: &Store,
    workout_id: &EntityId,
    identifier: &str,
) -> Result<EntityId, String> {
    let workout = store
        .get_workout(workout_id)
        .ok_or_else(|| format!("Workout not found: {}", workout_id))?;
    workout
        .exercises
        .iter()
        .find(|e| e.id.as_str() == identifier)
        .or_else(|| {
            workout
                .exercises
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(identifier))
        })
        .map(|e| e.id.clone())
        .ok_or_else(|| format!("Exercise not found: {}", identifier))
}

/// Finds a set by ID or by its 1-based position in the exercise.
pub fn resolve_set(
    store: &Store,
    workout_id: &EntityId,
    exercise_id: &EntityId,
    identifier: &str,
) -> Result<EntityId, String> {
    let exercise = store
        .get_exercise(workout_id, exercise_id)
        .ok_or_else(|| format!("Exercise not found: {}", exercise_id))?;
    exercise
        .sets
        .iter()
        .find(|s| s.id.as_str() == identifier)
        .or_else(|| {
            identifier
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| exercise.sets.get(i))
        })
        .map(|s| s.id.clone())
        .ok_or_else(|| format!("Set not found: {}", identifier))
}

/// Converts a 1-based position from the command line.
pub fn position_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1".to_string())
}

/// Asks a yes/no question on stdin; anything but "y" is a no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::{SequentialIds, SetInput};

    fn store() -> (Store, EntityId, EntityId) {
        let mut store = Store::new(SequentialIds::default());
        let w = store.create_workout("Leg Day").unwrap();
        let e = store.create_exercise(&w, "Squat").unwrap();
        store
            .create_set(&w, &e, SetInput::new(135.0, 5).unwrap())
            .unwrap();
        store
            .create_set(&w, &e, SetInput::new(155.0, 3).unwrap())
            .unwrap();
        (store, w, e)
    }

    #[test]
    fn test_resolve_workout_by_id_or_name() {
        let (store, w, _) = store();
        assert_eq!(resolve_workout(&store, w.as_str()).unwrap(), w);
        assert_eq!(resolve_workout(&store, "leg day").unwrap(), w);
        assert!(resolve_workout(&store, "Arm Day").is_err());
    }

    #[test]
    fn test_resolve_exercise() {
        let (store, w, e) = store();
        assert_eq!(resolve_exercise(&store, &w, "SQUAT").unwrap(), e);
        assert!(resolve_exercise(&store, &w, "Bench").is_err());
    }

    #[test]
    fn test_resolve_set_by_position() {
        let (store, w, e) = store();
        let sets = &store.get_exercise(&w, &e).unwrap().sets;

        assert_eq!(resolve_set(&store, &w, &e, "2").unwrap(), sets[1].id);
        assert_eq!(
            resolve_set(&store, &w, &e, sets[0].id.as_str()).unwrap(),
            sets[0].id
        );
        assert!(resolve_set(&store, &w, &e, "0").is_err());
        assert!(resolve_set(&store, &w, &e, "3").is_err());
    }

    #[test]
    fn test_position_index() {
        assert_eq!(position_index(1).unwrap(), 0);
        assert!(position_index(0).is_err());
    }
}

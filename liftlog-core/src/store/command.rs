//! Store commands and the pure state transition that applies them.
//!
//! `transition` never performs I/O and never mutates its input; the
//! [`Store`](super::Store) wraps it and publishes the resulting collection.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::error::StoreError;
use super::input::SetInput;
use crate::entity_id::EntityId;
use crate::models::{Exercise, Workout, WorkoutSet};

/// Every mutation the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the whole collection (startup load).
    LoadAll(Vec<Workout>),
    ClearAll,
    CreateWorkout {
        id: EntityId,
        name: String,
        date: Option<DateTime<Utc>>,
    },
    UpdateWorkout(Workout),
    DeleteWorkout(EntityId),
    ReorderWorkouts(Vec<Workout>),
    CreateExercise {
        workout_id: EntityId,
        id: EntityId,
        name: String,
    },
    UpdateExercise {
        workout_id: EntityId,
        exercise: Exercise,
    },
    DeleteExercise {
        workout_id: EntityId,
        exercise_id: EntityId,
    },
    ReorderExercises {
        workout_id: EntityId,
        exercises: Vec<Exercise>,
    },
    CreateSet {
        workout_id: EntityId,
        exercise_id: EntityId,
        id: EntityId,
        input: SetInput,
    },
    UpdateSet {
        workout_id: EntityId,
        exercise_id: EntityId,
        set: WorkoutSet,
    },
    DeleteSet {
        workout_id: EntityId,
        exercise_id: EntityId,
        set_id: EntityId,
    },
}

/// Entities addressed by id within their parent.
pub(crate) trait Identified {
    const KIND: &'static str;
    fn entity_id(&self) -> &EntityId;
}

impl Identified for Workout {
    const KIND: &'static str = "workout";
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Exercise {
    const KIND: &'static str = "exercise";
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for WorkoutSet {
    const KIND: &'static str = "set";
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

/// Apply `command` to `workouts`, returning the next collection.
pub fn transition(workouts: &[Workout], command: Command) -> Result<Vec<Workout>, StoreError> {
    let mut next = match command {
        Command::LoadAll(_) | Command::ClearAll => Vec::new(),
        _ => workouts.to_vec(),
    };

    match command {
        Command::LoadAll(collection) => next = collection,

        Command::ClearAll => next.clear(),

        Command::CreateWorkout { id, name, date } => {
            let name = normalize_name(&name)?;
            ensure_unused(&next, &id)?;
            let mut workout = Workout::new(id, name);
            workout.date = date;
            next.push(workout);
        }

        Command::UpdateWorkout(workout) => {
            let workout = normalize_workout(workout)?;
            let slot = workout_mut(&mut next, &workout.id)?;
            *slot = workout;
        }

        Command::DeleteWorkout(id) => next.retain(|w| w.id != id),

        Command::ReorderWorkouts(sequence) => {
            ensure_permutation(&next, &sequence)?;
            next = sequence
                .into_iter()
                .map(normalize_workout)
                .collect::<Result<_, _>>()?;
        }

        Command::CreateExercise {
            workout_id,
            id,
            name,
        } => {
            let name = normalize_name(&name)?;
            let workout = workout_mut(&mut next, &workout_id)?;
            ensure_unused(&workout.exercises, &id)?;
            workout.exercises.push(Exercise::new(id, name));
        }

        Command::UpdateExercise {
            workout_id,
            exercise,
        } => {
            let exercise = normalize_exercise(exercise)?;
            let workout = workout_mut(&mut next, &workout_id)?;
            let slot = exercise_mut(workout, &exercise.id)?;
            *slot = exercise;
        }

        Command::DeleteExercise {
            workout_id,
            exercise_id,
        } => {
            if let Some(workout) = next.iter_mut().find(|w| w.id == workout_id) {
                workout.exercises.retain(|e| e.id != exercise_id);
            }
        }

        Command::ReorderExercises {
            workout_id,
            exercises,
        } => {
            let workout = workout_mut(&mut next, &workout_id)?;
            ensure_permutation(&workout.exercises, &exercises)?;
            workout.exercises = exercises
                .into_iter()
                .map(normalize_exercise)
                .collect::<Result<_, _>>()?;
        }

        Command::CreateSet {
            workout_id,
            exercise_id,
            id,
            input,
        } => {
            let workout = workout_mut(&mut next, &workout_id)?;
            let exercise = exercise_mut(workout, &exercise_id)?;
            ensure_unused(&exercise.sets, &id)?;
            exercise
                .sets
                .push(WorkoutSet::new(id, input.weight(), input.reps()));
        }

        Command::UpdateSet {
            workout_id,
            exercise_id,
            set,
        } => {
            SetInput::new(set.weight, set.reps)?;
            let workout = workout_mut(&mut next, &workout_id)?;
            let exercise = exercise_mut(workout, &exercise_id)?;
            let slot = exercise
                .sets
                .iter_mut()
                .find(|s| s.id == set.id)
                .ok_or_else(|| StoreError::SetNotFound(set.id.clone()))?;
            *slot = set;
        }

        Command::DeleteSet {
            workout_id,
            exercise_id,
            set_id,
        } => {
            if let Some(exercise) = next
                .iter_mut()
                .find(|w| w.id == workout_id)
                .and_then(|w| w.exercises.iter_mut().find(|e| e.id == exercise_id))
            {
                exercise.sets.retain(|s| s.id != set_id);
            }
        }
    }

    Ok(next)
}

fn normalize_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(trimmed.to_string())
}

// Whole-entity replacements keep set values as given so that older data with
// zero weights can still be renamed or reordered.
fn normalize_workout(mut workout: Workout) -> Result<Workout, StoreError> {
    workout.name = normalize_name(&workout.name)?;
    ensure_unique(&workout.exercises)?;
    workout.exercises = workout
        .exercises
        .into_iter()
        .map(normalize_exercise)
        .collect::<Result<_, _>>()?;
    Ok(workout)
}

fn normalize_exercise(mut exercise: Exercise) -> Result<Exercise, StoreError> {
    exercise.name = normalize_name(&exercise.name)?;
    ensure_unique(&exercise.sets)?;
    Ok(exercise)
}

fn workout_mut<'a>(
    workouts: &'a mut [Workout],
    id: &EntityId,
) -> Result<&'a mut Workout, StoreError> {
    workouts
        .iter_mut()
        .find(|w| &w.id == id)
        .ok_or_else(|| StoreError::WorkoutNotFound(id.clone()))
}

fn exercise_mut<'a>(
    workout: &'a mut Workout,
    id: &EntityId,
) -> Result<&'a mut Exercise, StoreError> {
    workout
        .exercises
        .iter_mut()
        .find(|e| &e.id == id)
        .ok_or_else(|| StoreError::ExerciseNotFound(id.clone()))
}

fn ensure_unused<T: Identified>(siblings: &[T], id: &EntityId) -> Result<(), StoreError> {
    if siblings.iter().any(|s| s.entity_id() == id) {
        return Err(StoreError::DuplicateId {
            kind: T::KIND,
            id: id.clone(),
        });
    }
    Ok(())
}

fn ensure_unique<T: Identified>(items: &[T]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.entity_id()) {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: item.entity_id().clone(),
            });
        }
    }
    Ok(())
}

fn ensure_permutation<T: Identified>(current: &[T], proposed: &[T]) -> Result<(), StoreError> {
    let rejected = || {
        StoreError::NotAPermutation(match T::KIND {
            "workout" => "workouts",
            "exercise" => "exercises",
            _ => "sets",
        })
    };

    if current.len() != proposed.len() {
        return Err(rejected());
    }
    let existing: HashSet<&EntityId> = current.iter().map(Identified::entity_id).collect();
    let mut seen = HashSet::new();
    for item in proposed {
        let id = item.entity_id();
        if !existing.contains(id) || !seen.insert(id) {
            return Err(rejected());
        }
    }
    Ok(())
}

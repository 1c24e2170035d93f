//! In-memory workout store.
//!
//! The store owns the collection and is the only place it changes. Every
//! successful mutation bumps the revision and publishes a [`Snapshot`] on a
//! watch channel before returning; subscribers (the persister among them)
//! always see the newest snapshot, possibly skipping intermediate ones.
//!
//! # Example
//!
//! ```
//! use liftlog_core::{SequentialIds, SetInput, Store};
//!
//! let mut store = Store::new(SequentialIds::default());
//! let workout_id = store.create_workout("Leg Day").unwrap();
//! let exercise_id = store.create_exercise(&workout_id, "Squat").unwrap();
//! store
//!     .create_set(&workout_id, &exercise_id, SetInput::new(135.0, 5).unwrap())
//!     .unwrap();
//!
//! let squat = store.get_exercise(&workout_id, &exercise_id).unwrap();
//! assert_eq!(squat.sets[0].reps, 5);
//! ```

mod command;
mod error;
mod input;

pub use command::{transition, Command};
pub use error::StoreError;
pub use input::SetInput;

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::entity_id::{EntityId, IdGenerator, UuidIds};
use crate::models::{Exercise, Workout, WorkoutSet};

// Attempts before giving up on an id generator that keeps colliding.
const MAX_ID_ATTEMPTS: usize = 64;

/// The collection as of one revision.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub revision: u64,
    pub workouts: Arc<Vec<Workout>>,
}

pub struct Store {
    workouts: Arc<Vec<Workout>>,
    revision: u64,
    ids: Box<dyn IdGenerator>,
    publisher: watch::Sender<Snapshot>,
}

impl Store {
    /// Creates an empty store drawing fresh ids from `ids`.
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        let (publisher, _) = watch::channel(Snapshot::default());
        Self {
            workouts: Arc::new(Vec::new()),
            revision: 0,
            ids: Box::new(ids),
            publisher,
        }
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            workouts: Arc::clone(&self.workouts),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Applies a command and publishes the result.
    pub fn dispatch(&mut self, command: Command) -> Result<(), StoreError> {
        let next = transition(&self.workouts, command)?;
        self.publish(next);
        Ok(())
    }

    fn publish(&mut self, next: Vec<Workout>) {
        self.workouts = Arc::new(next);
        self.revision += 1;
        debug!(revision = self.revision, workouts = self.workouts.len(), "store updated");
        self.publisher.send_replace(self.snapshot());
    }

    // ==================== Collection ====================

    /// Replaces the whole collection. Never rejected.
    pub fn load_all(&mut self, workouts: Vec<Workout>) {
        self.publish(workouts);
    }

    pub fn clear_all(&mut self) {
        self.publish(Vec::new());
    }

    // ==================== Workouts ====================

    /// Appends a new workout dated now. Returns its id.
    pub fn create_workout(&mut self, name: &str) -> Result<EntityId, StoreError> {
        let id = fresh_id(self.ids.as_mut(), |id| {
            self.workouts.iter().any(|w| &w.id == id)
        })?;
        self.dispatch(Command::CreateWorkout {
            id: id.clone(),
            name: name.to_string(),
            date: Some(Utc::now()),
        })?;
        Ok(id)
    }

    pub fn update_workout(&mut self, workout: Workout) -> Result<(), StoreError> {
        self.dispatch(Command::UpdateWorkout(workout))
    }

    /// Removes a workout with everything it contains.
    ///
    /// Deleting an absent id is a no-op; returns whether anything was removed.
    pub fn delete_workout(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        let existed = self.get_workout(id).is_some();
        self.dispatch(Command::DeleteWorkout(id.clone()))?;
        Ok(existed)
    }

    /// Replaces the workout order. `workouts` must hold exactly the current ids.
    pub fn reorder_workouts(&mut self, workouts: Vec<Workout>) -> Result<(), StoreError> {
        self.dispatch(Command::ReorderWorkouts(workouts))
    }

    /// Moves one workout to `position`, shifting the others.
    pub fn move_workout(&mut self, id: &EntityId, position: usize) -> Result<(), StoreError> {
        let sequence = moved(&self.workouts, |w| &w.id == id, position)
            .ok_or_else(|| StoreError::WorkoutNotFound(id.clone()))??;
        self.reorder_workouts(sequence)
    }

    pub fn get_workout(&self, id: &EntityId) -> Option<&Workout> {
        self.workouts.iter().find(|w| &w.id == id)
    }

    // ==================== Exercises ====================

    pub fn create_exercise(
        &mut self,
        workout_id: &EntityId,
        name: &str,
    ) -> Result<EntityId, StoreError> {
        let workout = self
            .workouts
            .iter()
            .find(|w| &w.id == workout_id)
            .ok_or_else(|| StoreError::WorkoutNotFound(workout_id.clone()))?;
        let id = fresh_id(self.ids.as_mut(), |id| workout.find_exercise(id).is_some())?;
        self.dispatch(Command::CreateExercise {
            workout_id: workout_id.clone(),
            id: id.clone(),
            name: name.to_string(),
        })?;
        Ok(id)
    }

    pub fn update_exercise(
        &mut self,
        workout_id: &EntityId,
        exercise: Exercise,
    ) -> Result<(), StoreError> {
        self.dispatch(Command::UpdateExercise {
            workout_id: workout_id.clone(),
            exercise,
        })
    }

    pub fn delete_exercise(
        &mut self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
    ) -> Result<bool, StoreError> {
        let existed = self.get_exercise(workout_id, exercise_id).is_some();
        self.dispatch(Command::DeleteExercise {
            workout_id: workout_id.clone(),
            exercise_id: exercise_id.clone(),
        })?;
        Ok(existed)
    }

    pub fn reorder_exercises(
        &mut self,
        workout_id: &EntityId,
        exercises: Vec<Exercise>,
    ) -> Result<(), StoreError> {
        self.dispatch(Command::ReorderExercises {
            workout_id: workout_id.clone(),
            exercises,
        })
    }

    pub fn move_exercise(
        &mut self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
        position: usize,
    ) -> Result<(), StoreError> {
        let workout = self
            .get_workout(workout_id)
            .ok_or_else(|| StoreError::WorkoutNotFound(workout_id.clone()))?;
        let sequence = moved(&workout.exercises, |e| &e.id == exercise_id, position)
            .ok_or_else(|| StoreError::ExerciseNotFound(exercise_id.clone()))??;
        self.reorder_exercises(workout_id, sequence)
    }

    pub fn get_exercise(&self, workout_id: &EntityId, exercise_id: &EntityId) -> Option<&Exercise> {
        self.get_workout(workout_id)?.find_exercise(exercise_id)
    }

    // ==================== Sets ====================

    pub fn create_set(
        &mut self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
        input: SetInput,
    ) -> Result<EntityId, StoreError> {
        let exercise = self
            .workouts
            .iter()
            .find(|w| &w.id == workout_id)
            .ok_or_else(|| StoreError::WorkoutNotFound(workout_id.clone()))?
            .find_exercise(exercise_id)
            .ok_or_else(|| StoreError::ExerciseNotFound(exercise_id.clone()))?;
        let id = fresh_id(self.ids.as_mut(), |id| exercise.find_set(id).is_some())?;
        self.dispatch(Command::CreateSet {
            workout_id: workout_id.clone(),
            exercise_id: exercise_id.clone(),
            id: id.clone(),
            input,
        })?;
        Ok(id)
    }

    pub fn update_set(
        &mut self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
        set: WorkoutSet,
    ) -> Result<(), StoreError> {
        self.dispatch(Command::UpdateSet {
            workout_id: workout_id.clone(),
            exercise_id: exercise_id.clone(),
            set,
        })
    }

    pub fn delete_set(
        &mut self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
        set_id: &EntityId,
    ) -> Result<bool, StoreError> {
        let existed = self.get_set(workout_id, exercise_id, set_id).is_some();
        self.dispatch(Command::DeleteSet {
            workout_id: workout_id.clone(),
            exercise_id: exercise_id.clone(),
            set_id: set_id.clone(),
        })?;
        Ok(existed)
    }

    pub fn get_set(
        &self,
        workout_id: &EntityId,
        exercise_id: &EntityId,
        set_id: &EntityId,
    ) -> Option<&WorkoutSet> {
        self.get_exercise(workout_id, exercise_id)?.find_set(set_id)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(UuidIds)
    }
}

fn fresh_id(
    ids: &mut dyn IdGenerator,
    taken: impl Fn(&EntityId) -> bool,
) -> Result<EntityId, StoreError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = ids.generate();
        if !taken(&id) {
            return Ok(id);
        }
    }
    Err(StoreError::IdExhausted)
}

/// Copy of `items` with the first match moved to `position`.
/// `None` when nothing matches.
fn moved<T: Clone>(
    items: &[T],
    matches: impl Fn(&T) -> bool,
    position: usize,
) -> Option<Result<Vec<T>, StoreError>> {
    let from = items.iter().position(matches)?;
    if position >= items.len() {
        return Some(Err(StoreError::PositionOutOfRange {
            position,
            len: items.len(),
        }));
    }
    let mut sequence = items.to_vec();
    let item = sequence.remove(from);
    sequence.insert(position, item);
    Some(Ok(sequence))
}

//! Store error types.

use thiserror::Error;

use crate::entity_id::EntityId;

/// Reasons a store operation is rejected. A rejected operation leaves the
/// collection untouched and publishes nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Weight must be a positive number, got {0}")]
    InvalidWeight(String),

    #[error("Reps must be a positive whole number, got {0}")]
    InvalidReps(String),

    #[error("Workout not found: {0}")]
    WorkoutNotFound(EntityId),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(EntityId),

    #[error("Set not found: {0}")]
    SetNotFound(EntityId),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: EntityId },

    #[error("New {0} order must contain exactly the existing {0}")]
    NotAPermutation(&'static str),

    #[error("Position {position} is out of range for {len} item(s)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Could not generate an unused id")]
    IdExhausted,
}

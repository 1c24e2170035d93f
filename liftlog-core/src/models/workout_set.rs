use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity_id::EntityId;

/// One recorded weight/reps pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub id: EntityId,
    pub weight: f64,
    pub reps: u32,
}

impl WorkoutSet {
    pub fn new(id: EntityId, weight: f64, reps: u32) -> Self {
        Self { id, weight, reps }
    }

    /// Weight moved across all reps of this set.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

impl fmt::Display for WorkoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.weight, self.reps)
    }
}

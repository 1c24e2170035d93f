use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::workout_set::WorkoutSet;
use crate::entity_id::EntityId;

/// A named movement within a workout, owning an ordered list of sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

impl Exercise {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            date: None,
            sets: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_sets(mut self, sets: Vec<WorkoutSet>) -> Self {
        self.sets = sets;
        self
    }

    pub fn find_set(&self, id: &EntityId) -> Option<&WorkoutSet> {
        self.sets.iter().find(|s| &s.id == id)
    }

    pub fn volume(&self) -> f64 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.sets.len();
        writeln!(
            f,
            "{} ({} set{})",
            self.name,
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for (i, set) in self.sets.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, set)?;
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::exercise::Exercise;
use crate::entity_id::EntityId;

/// A logged session: a named, ordered container of exercises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: EntityId,
    pub name: String,
    /// Creation time. Absent in data written before dates were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            date: None,
            exercises: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    pub fn find_exercise(&self, id: &EntityId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| &e.id == id)
    }

    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).sum()
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;

        if let Some(date) = &self.date {
            writeln!(f, "Date: {}", date.format("%Y-%m-%d %H:%M"))?;
        }

        if self.exercises.is_empty() {
            writeln!(f, "\nNo exercises yet")?;
            return Ok(());
        }

        writeln!(f)?;
        for exercise in &self.exercises {
            write!(f, "{}", exercise)?;
        }
        writeln!(
            f,
            "\nSets: {}  Volume: {}",
            self.set_count(),
            self.total_volume()
        )?;

        Ok(())
    }
}

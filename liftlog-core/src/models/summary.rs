//! Read-only views over the whole collection, used by history listings.

use serde::Serialize;
use std::fmt;

use super::workout::Workout;

/// Totals across a collection of workouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub workouts: usize,
    pub exercises: usize,
    pub sets: usize,
    pub volume: f64,
}

impl Summary {
    pub fn of(workouts: &[Workout]) -> Self {
        workouts.iter().fold(Self::default(), |acc, w| Self {
            workouts: acc.workouts + 1,
            exercises: acc.exercises + w.exercises.len(),
            sets: acc.sets + w.set_count(),
            volume: acc.volume + w.total_volume(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workouts: {}  Exercises: {}  Sets: {}  Volume: {}",
            self.workouts, self.exercises, self.sets, self.volume
        )
    }
}

/// Workouts sorted newest first; undated workouts go last in stored order.
pub fn history_order(workouts: &[Workout]) -> Vec<&Workout> {
    let mut sorted: Vec<&Workout> = workouts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::EntityId;
    use crate::models::{Exercise, WorkoutSet};
    use chrono::{TimeZone, Utc};

    fn id(s: &str) -> EntityId {
        EntityId::parse(s).unwrap()
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn test_summary_totals() {
        let workouts = vec![
            Workout::new(id("w1"), "A").with_exercises(vec![Exercise::new(id("e1"), "Squat")
                .with_sets(vec![
                    WorkoutSet::new(id("s1"), 100.0, 5),
                    WorkoutSet::new(id("s2"), 100.0, 5),
                ])]),
            Workout::new(id("w2"), "B").with_exercises(vec![
                Exercise::new(id("e1"), "Row"),
                Exercise::new(id("e2"), "Curl")
                    .with_sets(vec![WorkoutSet::new(id("s1"), 20.0, 10)]),
            ]),
        ];

        let summary = Summary::of(&workouts);
        assert_eq!(summary.workouts, 2);
        assert_eq!(summary.exercises, 3);
        assert_eq!(summary.sets, 3);
        assert_eq!(summary.volume, 1200.0);
    }

    #[test]
    fn test_history_order_newest_first() {
        let older = Workout::new(id("w1"), "Older")
            .with_date(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let undated = Workout::new(id("w2"), "Undated");
        let newer = Workout::new(id("w3"), "Newer")
            .with_date(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        let workouts = vec![older, undated, newer];

        let names: Vec<&str> = history_order(&workouts)
            .into_iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["Newer", "Older", "Undated"]);
    }
}

mod exercise;
mod summary;
mod workout;
mod workout_set;

pub use exercise::Exercise;
pub use summary::{history_order, Summary};
pub use workout::Workout;
pub use workout_set::WorkoutSet;

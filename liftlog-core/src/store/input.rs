//! Validated weight/reps input for new and edited sets.

use super::error::StoreError;

/// A weight/reps pair that passed validation.
///
/// Weight must be finite and greater than zero; reps must be at least one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetInput {
    weight: f64,
    reps: u32,
}

impl SetInput {
    pub fn new(weight: f64, reps: u32) -> Result<Self, StoreError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(StoreError::InvalidWeight(weight.to_string()));
        }
        if reps == 0 {
            return Err(StoreError::InvalidReps(reps.to_string()));
        }
        Ok(Self { weight, reps })
    }

    /// Parse text fields as typed into a form or passed on the command line.
    pub fn parse(weight: &str, reps: &str) -> Result<Self, StoreError> {
        let weight_num: f64 = weight
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidWeight(weight.to_string()))?;
        let reps_num: u32 = reps
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidReps(reps.to_string()))?;
        Self::new(weight_num, reps_num)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }
}

//! Fitness-proportionate weights
//!
//! Individual `i` is weighted by its fitness divided by the generation's
//! maximum fitness, so every weight lies in [0, 1] and the total never exceeds
//! the population size however large the raw values are. When every fitness
//! is exactly zero the distribution falls back to uniform weights, so a
//! degenerate generation still breeds.

use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;

/// Check a single fitness value returned by the client
pub fn validate_fitness(index: usize, value: f64) -> Result<(), ContractViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ContractViolation::InvalidFitness { index, value })
    }
}

/// Cumulative selection weights over a population, in population order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Running sum of normalized weights; entry `i` is the upper edge of
    /// `i`'s interval
    cumulative: Vec<f64>,
    /// Index of the last individual with a non-empty interval
    last_positive: usize,
    /// True when built by the all-zero fallback
    uniform: bool,
}

impl FitnessWeights {
    /// Build weights from validated fitness values
    pub fn from_fitness(values: &[f64]) -> Result<Self, ContractViolation> {
        for (index, &value) in values.iter().enumerate() {
            validate_fitness(index, value)?;
        }

        if values.iter().all(|&v| v == 0.0) {
            return Ok(Self::uniform(values.len()));
        }

        let max = values.iter().copied().fold(0.0, f64::max);
        let mut cumulative = Vec::with_capacity(values.len());
        let mut sum = 0.0;
        let mut last_positive = 0;
        for (index, &value) in values.iter().enumerate() {
            sum += value / max;
            cumulative.push(sum);
            if value > 0.0 {
                last_positive = index;
            }
        }

        Ok(Self {
            cumulative,
            last_positive,
            uniform: false,
        })
    }

    /// Equal weight for each of `len` individuals
    pub fn uniform(len: usize) -> Self {
        Self {
            cumulative: (1..=len).map(|i| i as f64).collect(),
            last_positive: len.saturating_sub(1),
            uniform: true,
        }
    }

    /// Number of individuals covered
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// True if no individual is covered
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Whether the all-zero fallback produced these weights
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Index of the first individual whose cumulative interval contains `point`
    ///
    /// `point` is expected in `[0, total)`. Out-of-range points resolve to the
    /// last individual with a positive weight.
    pub fn locate(&self, point: f64) -> usize {
        let index = self.cumulative.partition_point(|&edge| edge <= point);
        index.min(self.last_positive)
    }
}

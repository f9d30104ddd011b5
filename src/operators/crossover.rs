//! Crossover operators
//!
//! Two recombination policies are provided. They differ in how much of each
//! parent's gene ordering survives, which affects diversity and convergence:
//!
//! - [`UniformCrossover`]: each position independently comes from either
//!   parent (50/50 by default).
//! - [`SinglePointCrossover`]: one random split point; the head comes from
//!   the first parent and the tail from the second.
//!
//! [`CrossoverPolicy`] names one of them in configuration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;
use crate::genome::dna::Dna;
use crate::operators::traits::{check_parents, CrossoverOperator};

/// Uniform crossover
///
/// Each gene is taken from the first parent with probability `bias`,
/// otherwise from the second.
#[derive(Clone, Debug)]
pub struct UniformCrossover {
    /// Probability of taking a gene from the first parent
    pub bias: f64,
}

impl UniformCrossover {
    /// Create an unbiased uniform crossover
    pub fn new() -> Self {
        Self { bias: 0.5 }
    }

    /// Create with a custom bias towards the first parent
    ///
    /// # Panics
    ///
    /// Panics if `bias` is outside [0, 1].
    pub fn with_bias(bias: f64) -> Self {
        assert!((0.0..=1.0).contains(&bias), "Bias must be in [0, 1]");
        Self { bias }
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Clone> CrossoverOperator<G> for UniformCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Dna<G>,
        parent2: &Dna<G>,
        rng: &mut R,
    ) -> Result<Dna<G>, ContractViolation> {
        check_parents(parent1, parent2)?;

        Ok(parent1
            .iter()
            .zip(parent2.iter())
            .map(|(a, b)| {
                if rng.gen::<f64>() < self.bias {
                    a.clone()
                } else {
                    b.clone()
                }
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Single-point crossover
///
/// Draws a split point `n` uniformly from `0..len`; the child takes genes
/// `0..n` from the first parent and `n..len` from the second.
#[derive(Clone, Debug, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    /// Create a new single-point crossover
    pub fn new() -> Self {
        Self
    }
}

impl<G: Clone> CrossoverOperator<G> for SinglePointCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Dna<G>,
        parent2: &Dna<G>,
        rng: &mut R,
    ) -> Result<Dna<G>, ContractViolation> {
        let len = check_parents(parent1, parent2)?;
        if len == 0 {
            return Ok(Dna::new(Vec::new()));
        }

        let point = rng.gen_range(0..len);
        Ok(parent1.genes()[..point]
            .iter()
            .chain(parent2.genes()[point..].iter())
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "single_point"
    }
}

/// Crossover policy selectable through configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverPolicy {
    /// Independent 50/50 choice per gene
    #[default]
    Uniform,
    /// One random split point, head from the first parent
    SinglePoint,
}

impl<G: Clone> CrossoverOperator<G> for CrossoverPolicy {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Dna<G>,
        parent2: &Dna<G>,
        rng: &mut R,
    ) -> Result<Dna<G>, ContractViolation> {
        match self {
            Self::Uniform => UniformCrossover::new().crossover(parent1, parent2, rng),
            Self::SinglePoint => SinglePointCrossover::new().crossover(parent1, parent2, rng),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::SinglePoint => "single_point",
        }
    }
}

//! Engine configuration
//!
//! A [`Configuration`] is resolved once, at `Engine::initialize`, from the
//! defaults and the [`ConfigOverrides`] returned by the client. Overrides
//! replace defaults key by key; keys the client leaves unset keep their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::operators::crossover::CrossoverPolicy;

/// Default number of individuals per generation
pub const DEFAULT_POPULATION_SIZE: usize = 200;
/// Default number of genes produced by the stock `create_dna`
pub const DEFAULT_DNA_SIZE: usize = 50;
/// Default per-gene mutation probability
pub const DEFAULT_MUTATION_P: f64 = 0.01;

/// Resolved, validated engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Number of individuals in every generation
    pub population_size: usize,
    /// Number of genes the default `create_dna` generates
    pub dna_size: usize,
    /// Per-gene probability of being replaced by a fresh gene
    pub mutation_p: f64,
    /// Crossover policy used by `Engine::new`
    pub crossover: CrossoverPolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            dna_size: DEFAULT_DNA_SIZE,
            mutation_p: DEFAULT_MUTATION_P,
            crossover: CrossoverPolicy::default(),
        }
    }
}

impl Configuration {
    /// Apply overrides on top of the defaults and validate the result
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            population_size: overrides
                .population_size
                .unwrap_or(defaults.population_size),
            dna_size: overrides.dna_size.unwrap_or(defaults.dna_size),
            mutation_p: overrides.mutation_p.unwrap_or(defaults.mutation_p),
            crossover: overrides.crossover.unwrap_or(defaults.crossover),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if self.dna_size == 0 {
            return Err(ConfigError::InvalidDnaSize(self.dna_size));
        }
        if !self.mutation_p.is_finite() || !(0.0..=1.0).contains(&self.mutation_p) {
            return Err(ConfigError::InvalidMutationProbability(self.mutation_p));
        }
        Ok(())
    }
}

/// Client-supplied configuration overrides
///
/// Deserializes from any serde mapping with the keys `population_size`,
/// `dna_size`, `mutation_p` and `crossover`. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dna_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossover: Option<CrossoverPolicy>,
}

impl ConfigOverrides {
    /// No overrides: every key takes its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Override the DNA size
    pub fn dna_size(mut self, size: usize) -> Self {
        self.dna_size = Some(size);
        self
    }

    /// Override the mutation probability
    pub fn mutation_p(mut self, probability: f64) -> Self {
        self.mutation_p = Some(probability);
        self
    }

    /// Override the crossover policy
    pub fn crossover(mut self, policy: CrossoverPolicy) -> Self {
        self.crossover = Some(policy);
        self
    }
}

//! Population type
//!
//! This module provides the Population container type.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::ContractViolation;
use crate::fitness::validate_fitness;
use crate::population::individual::{compare_fitness, Individual};

/// A fixed-size, ordered population of one generation
///
/// The engine builds a new `Population` for every generation; individuals
/// carry no identity across generations.
#[derive(Clone, Debug)]
pub struct Population<I> {
    individuals: Vec<I>,
    generation: usize,
}

impl<I: Individual> Population<I> {
    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<I>, generation: usize) -> Self {
        Self {
            individuals,
            generation,
        }
    }

    /// Get the generation this population belongs to
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&I> {
        self.individuals.get(index)
    }

    /// Iterate over individuals in population order
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.individuals.iter()
    }

    /// Get the individuals as a slice
    pub fn individuals(&self) -> &[I] {
        &self.individuals
    }

    /// Mutable access for client-side simulation
    ///
    /// A slice, so the population size cannot change through it.
    pub fn individuals_mut(&mut self) -> &mut [I] {
        &mut self.individuals
    }

    /// Consume the population and return its individuals
    pub fn into_individuals(self) -> Vec<I> {
        self.individuals
    }

    /// Get the best evaluated individual
    pub fn best(&self) -> Option<&I> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .max_by(|a, b| compare_fitness(*a, *b))
    }

    /// Get the worst evaluated individual
    pub fn worst(&self) -> Option<&I> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .min_by(|a, b| compare_fitness(*a, *b))
    }

    /// Check if every individual has a fitness
    pub fn all_evaluated(&self) -> bool {
        self.individuals.iter().all(|i| i.is_evaluated())
    }

    /// Fitness of every individual, `None` if any is unevaluated
    pub fn fitness_values(&self) -> Option<Vec<f64>> {
        self.individuals.iter().map(|i| i.fitness()).collect()
    }

    /// Mean fitness over evaluated individuals
    pub fn mean_fitness(&self) -> Option<f64> {
        let values: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness()).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Check that every individual's DNA has `expected` genes
    pub fn check_dna_length(&self, expected: usize) -> Result<(), ContractViolation> {
        for (index, individual) in self.individuals.iter().enumerate() {
            let actual = individual.dna().len();
            if actual != expected {
                return Err(ContractViolation::DnaLength {
                    index,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Compute and validate the fitness of every individual
    ///
    /// Nothing is written; the values are recorded with
    /// [`record_fitness`](Population::record_fitness) once the caller has
    /// committed to them.
    pub fn score<F>(&self, fitness: F) -> Result<Vec<f64>, ContractViolation>
    where
        F: Fn(&I) -> f64,
    {
        let values: Vec<f64> = self.individuals.iter().map(fitness).collect();
        validate_all(values)
    }

    /// Write previously scored fitness values, in population order
    pub fn record_fitness(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.individuals.len());
        for (individual, &value) in self.individuals.iter_mut().zip(values) {
            individual.set_fitness(value);
        }
    }
}

fn validate_all(values: Vec<f64>) -> Result<Vec<f64>, ContractViolation> {
    for (index, &value) in values.iter().enumerate() {
        validate_fitness(index, value)?;
    }
    Ok(values)
}

#[cfg(feature = "parallel")]
impl<I: Individual + Send + Sync> Population<I> {
    /// Like [`score`](Population::score), computed in parallel using rayon
    pub fn score_parallel<F>(&self, fitness: F) -> Result<Vec<f64>, ContractViolation>
    where
        F: Fn(&I) -> f64 + Sync,
    {
        let values: Vec<f64> = self.individuals.par_iter().map(|i| fitness(i)).collect();
        validate_all(values)
    }
}

#[cfg(not(feature = "parallel"))]
impl<I: Individual + Send + Sync> Population<I> {
    /// Like [`score`](Population::score) (sequential fallback when the
    /// `parallel` feature is disabled)
    pub fn score_parallel<F>(&self, fitness: F) -> Result<Vec<f64>, ContractViolation>
    where
        F: Fn(&I) -> f64 + Sync,
    {
        self.score(fitness)
    }
}

impl<I> std::ops::Index<usize> for Population<I> {
    type Output = I;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<'a, I> IntoIterator for &'a Population<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

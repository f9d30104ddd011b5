//! Individual contract
//!
//! This module provides the [`Individual`] trait every client-defined
//! individual satisfies, and [`BasicIndividual`], a ready-made
//! implementation for clients that need nothing beyond DNA and fitness.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::genome::dna::Dna;

/// A candidate solution: one DNA sequence plus its fitness
///
/// DNA is exposed read-only. An individual is built once from its DNA by
/// `Client::create_individual` and never rebuilt; a changed genome is always
/// a new individual.
pub trait Individual {
    /// The gene type carried in this individual's DNA
    type Gene: Clone;

    /// The DNA this individual was created from
    fn dna(&self) -> &Dna<Self::Gene>;

    /// Fitness for the current generation, `None` until evaluated
    fn fitness(&self) -> Option<f64>;

    /// Record the fitness computed by the engine
    fn set_fitness(&mut self, fitness: f64);

    /// Check if this individual has been evaluated
    fn is_evaluated(&self) -> bool {
        self.fitness().is_some()
    }
}

/// Stock individual: DNA, fitness and the generation it was born in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasicIndividual<G> {
    dna: Dna<G>,
    fitness: Option<f64>,
    birth_generation: usize,
}

impl<G> BasicIndividual<G> {
    /// Create a new, unevaluated individual
    pub fn new(dna: Dna<G>) -> Self {
        Self {
            dna,
            fitness: None,
            birth_generation: 0,
        }
    }

    /// Create a new individual tagged with its birth generation
    pub fn with_generation(dna: Dna<G>, generation: usize) -> Self {
        Self {
            dna,
            fitness: None,
            birth_generation: generation,
        }
    }

    /// Generation this individual was created in
    pub fn birth_generation(&self) -> usize {
        self.birth_generation
    }

    /// Take the DNA out of this individual
    pub fn into_dna(self) -> Dna<G> {
        self.dna
    }
}

impl<G: Clone> Individual for BasicIndividual<G> {
    type Gene = G;

    fn dna(&self) -> &Dna<G> {
        &self.dna
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

/// Order two individuals by fitness, unevaluated ones lowest
pub fn compare_fitness<I: Individual>(a: &I, b: &I) -> Ordering {
    match (a.fitness(), b.fitness()) {
        (Some(f1), Some(f2)) => f1.partial_cmp(&f2).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_new() {
        let individual = BasicIndividual::new(Dna::new(vec![1, 2, 3]));

        assert!(!individual.is_evaluated());
        assert_eq!(individual.fitness(), None);
        assert_eq!(individual.birth_generation(), 0);
        assert_eq!(individual.dna().genes(), &[1, 2, 3]);
    }

    #[test]
    fn test_individual_set_fitness() {
        let mut individual = BasicIndividual::with_generation(Dna::new(vec!['a']), 4);

        individual.set_fitness(2.5);
        assert!(individual.is_evaluated());
        assert_eq!(individual.fitness(), Some(2.5));
        assert_eq!(individual.birth_generation(), 4);
    }

    #[test]
    fn test_compare_fitness() {
        let mut high = BasicIndividual::new(Dna::new(vec![0]));
        let mut low = BasicIndividual::new(Dna::new(vec![1]));
        let unevaluated = BasicIndividual::new(Dna::new(vec![2]));
        high.set_fitness(10.0);
        low.set_fitness(1.0);

        assert_eq!(compare_fitness(&high, &low), Ordering::Greater);
        assert_eq!(compare_fitness(&low, &high), Ordering::Less);
        assert_eq!(compare_fitness(&unevaluated, &low), Ordering::Less);
    }

    #[test]
    fn test_individual_into_dna() {
        let dna = Dna::new(vec![7, 8]);
        let individual = BasicIndividual::new(dna.clone());
        assert_eq!(individual.into_dna(), dna);
    }
}

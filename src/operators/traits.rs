//! Operator traits
//!
//! This module defines the pluggable crossover seam of the engine.

use rand::Rng;

use crate::error::ContractViolation;
use crate::genome::dna::Dna;

/// Crossover operator trait
///
/// Combines the DNA of two equal-length parents into one child of the same
/// length. Implementations must not modify the parents.
pub trait CrossoverOperator<G: Clone>: Send + Sync {
    /// Produce one child from two parents
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Dna<G>,
        parent2: &Dna<G>,
        rng: &mut R,
    ) -> Result<Dna<G>, ContractViolation>;

    /// Short name used in logs and errors
    fn name(&self) -> &'static str;
}

/// Ensure two parents have the same length, returning it
pub fn check_parents<G>(parent1: &Dna<G>, parent2: &Dna<G>) -> Result<usize, ContractViolation> {
    if parent1.len() != parent2.len() {
        return Err(ContractViolation::ParentLength {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    Ok(parent1.len())
}

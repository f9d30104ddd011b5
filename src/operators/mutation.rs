//! Mutation operators
//!
//! This module provides gene-replacement mutation: every position is
//! independently swapped for a freshly generated gene.

use rand::Rng;

use crate::genome::dna::Dna;

/// Gene replacement mutation
///
/// With probability `probability` per position, the gene is replaced by one
/// obtained from the gene factory; otherwise it is copied unchanged.
#[derive(Clone, Debug)]
pub struct GeneReplacementMutation {
    /// Per-gene replacement probability
    pub probability: f64,
}

impl GeneReplacementMutation {
    /// Create a new gene replacement mutation
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside [0, 1].
    pub fn new(probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        Self { probability }
    }

    /// Return a mutated copy of `dna`
    ///
    /// The input is left untouched, so parents stay valid for later draws in
    /// the same generation.
    pub fn mutate<G, R, F>(&self, dna: &Dna<G>, rng: &mut R, mut gene_factory: F) -> Dna<G>
    where
        G: Clone,
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> G,
    {
        dna.iter()
            .map(|gene| {
                if rng.gen::<f64>() < self.probability {
                    gene_factory(&mut *rng)
                } else {
                    gene.clone()
                }
            })
            .collect()
    }
}

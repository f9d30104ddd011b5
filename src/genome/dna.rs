//! DNA sequence type
//!
//! This module provides [`Dna`], the ordered gene sequence owned by every
//! individual. Genes are opaque to the engine: it only clones them, moves
//! them between sequences, and asks the client for fresh ones.

use serde::{Deserialize, Serialize};

/// An ordered sequence of genes
///
/// A `Dna` value is never edited in place by the engine. Crossover and
/// mutation always build a new sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dna<G> {
    genes: Vec<G>,
}

impl<G> Dna<G> {
    /// Create a DNA sequence from its genes
    pub fn new(genes: Vec<G>) -> Self {
        Self { genes }
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// True if the sequence holds no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get a reference to the genes
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Get the gene at `index`, if any
    pub fn get(&self, index: usize) -> Option<&G> {
        self.genes.get(index)
    }

    /// Iterate over the genes in order
    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.genes.iter()
    }

    /// Take the underlying vector
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

impl<G> From<Vec<G>> for Dna<G> {
    fn from(genes: Vec<G>) -> Self {
        Self::new(genes)
    }
}

impl<G> FromIterator<G> for Dna<G> {
    fn from_iter<T: IntoIterator<Item = G>>(iter: T) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

impl<G> AsRef<[G]> for Dna<G> {
    fn as_ref(&self) -> &[G] {
        &self.genes
    }
}

impl<G> std::ops::Index<usize> for Dna<G> {
    type Output = G;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl<'a, G> IntoIterator for &'a Dna<G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

impl<G> IntoIterator for Dna<G> {
    type Item = G;
    type IntoIter = std::vec::IntoIter<G>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.into_iter()
    }
}

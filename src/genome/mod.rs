//! Genetic material
//!
//! This module provides the [`Dna`](dna::Dna) sequence type. Genes
//! themselves are client-defined.

pub mod dna;

pub mod prelude {
    pub use super::dna::*;
}

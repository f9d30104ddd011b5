//! Fitness validation and the per-generation fitness distribution
//!
//! This module provides [`FitnessWeights`](weights::FitnessWeights), built
//! once per generation from the evaluated fitness values and shared by every
//! parent draw of that generation.

pub mod weights;

pub use weights::validate_fitness;

pub mod prelude {
    pub use super::weights::*;
}

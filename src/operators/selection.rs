//! Selection operators
//!
//! This module provides fitness-proportionate ("roulette wheel") parent
//! selection over a [`FitnessWeights`] distribution.

use rand::Rng;

use crate::fitness::weights::FitnessWeights;

/// Roulette wheel selection (fitness proportionate)
///
/// Draws a uniform value in `[0, total)` and returns the first individual,
/// in population order, whose cumulative weight interval contains it. With
/// all-zero fitness the weights are uniform, so every individual is equally
/// likely.
#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }

    /// Select the index of one individual
    ///
    /// # Panics
    ///
    /// Panics if `weights` covers no individuals.
    pub fn select<R: Rng + ?Sized>(&self, weights: &FitnessWeights, rng: &mut R) -> usize {
        assert!(!weights.is_empty(), "Population cannot be empty");

        let point = rng.gen_range(0.0..weights.total());
        weights.locate(point)
    }

    /// Select one individual from `population`
    pub fn select_parent<'a, T, R: Rng + ?Sized>(
        &self,
        population: &'a [T],
        weights: &FitnessWeights,
        rng: &mut R,
    ) -> &'a T {
        debug_assert_eq!(population.len(), weights.len());
        &population[self.select(weights, rng)]
    }
}

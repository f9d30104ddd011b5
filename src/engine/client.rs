//! Client contract
//!
//! Everything domain-specific (what a gene is, how an individual behaves,
//! how fitness is scored) lives behind the [`Client`] trait. The engine only
//! calls these hooks; it never inspects genes itself.

use rand::Rng;

use crate::config::{ConfigOverrides, Configuration};
use crate::genome::dna::Dna;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Callbacks and factories the engine requires from domain code
///
/// Only [`create_gene`](Client::create_gene),
/// [`create_individual`](Client::create_individual) and
/// [`evaluate_fitness`](Client::evaluate_fitness) are mandatory.
///
/// # Example
///
/// ```rust
/// use gengine::prelude::*;
/// use rand::Rng;
///
/// struct OneMax;
///
/// impl Client for OneMax {
///     type Gene = bool;
///     type Individual = BasicIndividual<bool>;
///
///     fn configuration(&self) -> ConfigOverrides {
///         ConfigOverrides::new().population_size(20).dna_size(16)
///     }
///
///     fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
///         rng.gen()
///     }
///
///     fn create_individual(&mut self, dna: Dna<bool>) -> Self::Individual {
///         BasicIndividual::new(dna)
///     }
///
///     fn evaluate_fitness(&self, individual: &Self::Individual) -> f64 {
///         individual.dna().iter().filter(|bit| **bit).count() as f64
///     }
/// }
///
/// let mut rng = rand::thread_rng();
/// let mut engine = Engine::new(OneMax);
/// engine.initialize(&mut rng)?;
/// engine.evolve(&mut rng)?;
/// assert_eq!(engine.current_generation(), 1);
/// # Ok::<(), EvolutionError>(())
/// ```
pub trait Client {
    /// Opaque unit of heritable information
    type Gene: Clone;

    /// Concrete individual built from a DNA sequence
    type Individual: Individual<Gene = Self::Gene>;

    /// Configuration overrides; the default keeps every default value
    fn configuration(&self) -> ConfigOverrides {
        ConfigOverrides::default()
    }

    /// Called exactly once, after configuration is validated and before the
    /// first individual is created
    fn on_init(&mut self, _config: &Configuration) {}

    /// Produce one fresh gene
    fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Gene;

    /// Produce the DNA of one generation-0 individual
    ///
    /// The default calls [`create_gene`](Client::create_gene) `dna_size`
    /// times. Whatever length the first call returns becomes the DNA length
    /// for the whole run.
    fn create_dna<R: Rng + ?Sized>(
        &mut self,
        config: &Configuration,
        rng: &mut R,
    ) -> Dna<Self::Gene> {
        (0..config.dna_size).map(|_| self.create_gene(rng)).collect()
    }

    /// Wrap a DNA sequence into an individual
    fn create_individual(&mut self, dna: Dna<Self::Gene>) -> Self::Individual;

    /// Score one individual
    ///
    /// Must return a finite, non-negative number. Higher values make the
    /// individual more likely to be picked as a parent.
    fn evaluate_fitness(&self, individual: &Self::Individual) -> f64;

    /// A new generation is ready (0 after `initialize`)
    fn on_generation_begin(&mut self, _generation: usize) {}

    /// `generation` has been scored and its successor bred; the scored
    /// population is about to be replaced
    ///
    /// Not called when `evolve` fails.
    fn on_generation_end(&mut self, _generation: usize, _population: &Population<Self::Individual>) {
    }

    /// Per-generation simulation step used by `Engine::run`
    fn simulate(&mut self, _generation: usize, _individuals: &mut [Self::Individual]) {}

    /// Cooperative stop flag checked by `Engine::run`
    fn is_stop_requested(&self) -> bool {
        false
    }
}

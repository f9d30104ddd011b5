//! Generational engine
//!
//! [`Engine`] owns the population and drives it through the
//! `Uninitialized -> Ready` state machine:
//!
//! 1. `initialize` resolves configuration, calls `on_init`, and builds
//!    generation 0 from the client's factories.
//! 2. Between generations the caller may read the population and step its
//!    own simulation through `individuals_mut`.
//! 3. `evolve` scores every individual, builds the fitness weights once,
//!    and breeds `population_size` children (two roulette draws, crossover,
//!    mutation, `create_individual`). Only once every child is valid are the
//!    scores recorded, `on_generation_end` fired and the old population
//!    replaced; a failed `evolve` leaves the engine as it was.

pub mod client;

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::diagnostics::{EvolutionSummary, GenerationStats};
use crate::error::{ContractViolation, EvoResult, LifecycleError};
use crate::fitness::weights::FitnessWeights;
use crate::genome::dna::Dna;
use crate::operators::crossover::CrossoverPolicy;
use crate::operators::mutation::GeneReplacementMutation;
use crate::operators::selection::RouletteSelection;
use crate::operators::traits::CrossoverOperator;
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::termination::{EvolutionState, TerminationCriterion};

pub use client::Client;

/// Lifecycle state of an [`Engine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// `initialize` has not succeeded yet
    Uninitialized,
    /// A population exists; `evolve` may be called repeatedly
    Ready,
}

/// Where the crossover operator comes from
#[derive(Clone, Debug)]
enum CrossoverSource<X> {
    /// The `crossover` key of the resolved configuration
    Configured,
    /// An operator supplied to `Engine::with_crossover`
    Custom(X),
}

/// Everything that exists once the engine is initialized
struct Run<I: Individual> {
    config: Configuration,
    population: Population<I>,
    mutation: GeneReplacementMutation,
    dna_length: usize,
}

/// Genetic algorithm engine
///
/// Single-threaded and synchronous: every call completes one step before
/// returning, and the caller decides when to stop.
pub struct Engine<C: Client, X = CrossoverPolicy> {
    client: C,
    crossover: CrossoverSource<X>,
    selection: RouletteSelection,
    run: Option<Run<C::Individual>>,
    best: Option<(Dna<C::Gene>, f64)>,
    evaluations: usize,
}

impl<C: Client> Engine<C> {
    /// Create an engine using the crossover policy named in the configuration
    pub fn new(client: C) -> Self {
        Self {
            client,
            crossover: CrossoverSource::Configured,
            selection: RouletteSelection::new(),
            run: None,
            best: None,
            evaluations: 0,
        }
    }
}

impl<C, X> Engine<C, X>
where
    C: Client,
    X: CrossoverOperator<C::Gene>,
{
    /// Create an engine with a custom crossover operator
    pub fn with_crossover(client: C, crossover: X) -> Self {
        Self {
            client,
            crossover: CrossoverSource::Custom(crossover),
            selection: RouletteSelection::new(),
            run: None,
            best: None,
            evaluations: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        if self.run.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    /// Get a reference to the client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a mutable reference to the client
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Consume the engine and return the client
    pub fn into_client(self) -> C {
        self.client
    }

    /// The resolved configuration, once initialized
    pub fn configuration(&self) -> Option<&Configuration> {
        self.run.as_ref().map(|run| &run.config)
    }

    /// DNA length established by generation 0
    pub fn dna_length(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.dna_length)
    }

    /// Generation counter; 0 before and right after `initialize`
    pub fn current_generation(&self) -> usize {
        self.run
            .as_ref()
            .map_or(0, |run| run.population.generation())
    }

    /// Total fitness evaluations performed
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Read-only view of the live population
    pub fn current_population(&self) -> EvoResult<&Population<C::Individual>> {
        self.run
            .as_ref()
            .map(|run| &run.population)
            .ok_or_else(|| LifecycleError::NotInitialized.into())
    }

    /// Mutable access to the live individuals for client-side simulation
    pub fn individuals_mut(&mut self) -> EvoResult<&mut [C::Individual]> {
        self.run
            .as_mut()
            .map(|run| run.population.individuals_mut())
            .ok_or_else(|| LifecycleError::NotInitialized.into())
    }

    /// Best individual evaluated so far: its DNA and fitness
    pub fn best(&self) -> Option<(&Dna<C::Gene>, f64)> {
        self.best.as_ref().map(|(dna, fitness)| (dna, *fitness))
    }

    /// Fitness of the best individual evaluated so far
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, fitness)| *fitness)
    }

    /// Build generation 0
    ///
    /// Fails with a lifecycle error if called twice, and with a
    /// configuration error before any client hook runs if the overrides are
    /// out of range.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EvoResult<()> {
        if self.run.is_some() {
            return Err(LifecycleError::AlreadyInitialized.into());
        }

        let config = Configuration::resolve(&self.client.configuration())?;
        self.client.on_init(&config);

        let mut individuals = Vec::with_capacity(config.population_size);
        let mut dna_length = None;
        for index in 0..config.population_size {
            let dna = self.client.create_dna(&config, rng);
            let expected = *dna_length.get_or_insert(dna.len());
            if dna.len() != expected {
                return Err(ContractViolation::DnaLength {
                    index,
                    expected,
                    actual: dna.len(),
                }
                .into());
            }

            let individual = self.client.create_individual(dna);
            check_individual(&individual, index, expected)?;
            individuals.push(individual);
        }
        let dna_length = dna_length.unwrap_or(0);

        info!(
            population_size = config.population_size,
            dna_length,
            mutation_p = config.mutation_p,
            "engine initialized"
        );

        self.run = Some(Run {
            mutation: GeneReplacementMutation::new(config.mutation_p),
            population: Population::from_individuals(individuals, 0),
            config,
            dna_length,
        });
        self.client.on_generation_begin(0);
        Ok(())
    }

    /// Advance one generation
    ///
    /// Returns statistics of the generation that was evaluated. On error the
    /// current population stays in place.
    pub fn evolve<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EvoResult<GenerationStats> {
        let start = Instant::now();
        let run = self.run.as_ref().ok_or(LifecycleError::NotInitialized)?;
        run.population.check_dna_length(run.dna_length)?;

        let client = &self.client;
        let fitness = run
            .population
            .score(|individual| client.evaluate_fitness(individual))?;

        self.breed(fitness, start, rng)
    }

    /// Turn the scored population into the next generation
    ///
    /// Nothing is committed until every child has been bred and checked.
    fn breed<R: Rng + ?Sized>(
        &mut self,
        fitness: Vec<f64>,
        start: Instant,
        rng: &mut R,
    ) -> EvoResult<GenerationStats> {
        let Self {
            client,
            crossover,
            selection,
            run,
            best,
            evaluations,
        } = self;
        let run = run.as_mut().ok_or(LifecycleError::NotInitialized)?;
        let generation = run.population.generation();

        let weights = FitnessWeights::from_fitness(&fitness)?;
        let stats = GenerationStats::from_fitness(generation, &fitness, weights.is_uniform());

        let parents = run.population.individuals();
        let mut children = Vec::with_capacity(run.config.population_size);
        for slot in 0..run.config.population_size {
            let parent1 = selection.select_parent(parents, &weights, rng);
            let parent2 = selection.select_parent(parents, &weights, rng);

            let (child, operator) = match crossover {
                CrossoverSource::Configured => (
                    run.config
                        .crossover
                        .crossover(parent1.dna(), parent2.dna(), rng)?,
                    CrossoverOperator::<C::Gene>::name(&run.config.crossover),
                ),
                CrossoverSource::Custom(op) => (
                    op.crossover(parent1.dna(), parent2.dna(), rng)?,
                    op.name(),
                ),
            };
            if child.len() != run.dna_length {
                return Err(ContractViolation::OperatorOutput {
                    operator,
                    expected: run.dna_length,
                    actual: child.len(),
                }
                .into());
            }

            let child = run
                .mutation
                .mutate(&child, rng, |r| client.create_gene(r));
            let individual = client.create_individual(child);
            check_individual(&individual, slot, run.dna_length)?;
            children.push(individual);
        }

        if weights.is_uniform() {
            warn!(generation, "all fitness values are zero, selecting parents uniformly");
        }
        run.population.record_fitness(&fitness);
        *evaluations += fitness.len();
        if let Some(top) = run.population.best() {
            let top_fitness = top.fitness().unwrap_or(0.0);
            if best.as_ref().map_or(true, |(_, f)| top_fitness > *f) {
                *best = Some((top.dna().clone(), top_fitness));
            }
        }
        client.on_generation_end(generation, &run.population);

        run.population = Population::from_individuals(children, generation + 1);

        let stats = stats.with_elapsed(start.elapsed());
        debug!(
            generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            worst = stats.worst_fitness,
            "generation evolved"
        );

        client.on_generation_begin(generation + 1);
        Ok(stats)
    }

    /// Evolve until `termination` fires or the client asks to stop
    ///
    /// Initializes the engine first if needed. Each iteration runs the
    /// client's `simulate` hook on the live individuals, then `evolve`.
    pub fn run<T, R>(
        &mut self,
        termination: &T,
        rng: &mut R,
    ) -> EvoResult<EvolutionSummary<C::Gene>>
    where
        T: TerminationCriterion + ?Sized,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        if self.run.is_none() {
            self.initialize(rng)?;
        }

        let mut history = Vec::new();
        let mut best_history = Vec::new();
        let reason = loop {
            let generation = self.current_generation();
            if let Some(run) = self.run.as_mut() {
                self.client
                    .simulate(generation, run.population.individuals_mut());
            }

            let stats = self.evolve(rng)?;
            best_history.push(stats.best_fitness);
            history.push(stats);

            if self.client.is_stop_requested() {
                break "Stop requested by client";
            }

            let state = EvolutionState {
                generation: self.current_generation(),
                evaluations: self.evaluations,
                best_fitness: self.best_fitness().unwrap_or(0.0),
                fitness_history: &best_history,
            };
            if termination.should_terminate(&state) {
                break termination.reason();
            }
        };

        info!(
            generations = self.current_generation(),
            best_fitness = ?self.best_fitness(),
            reason,
            "run finished"
        );

        Ok(EvolutionSummary {
            generations: self.current_generation(),
            best_dna: self.best.as_ref().map(|(dna, _)| dna.clone()),
            best_fitness: self.best_fitness(),
            history,
            termination_reason: Some(reason.to_string()),
            total_runtime_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

impl<C, X> Engine<C, X>
where
    C: Client + Sync,
    C::Individual: Send + Sync,
    X: CrossoverOperator<C::Gene>,
{
    /// Like [`evolve`](Engine::evolve), but evaluates fitness in parallel
    /// when the `parallel` feature is enabled
    ///
    /// Every score is computed before the fitness weights are built.
    pub fn evolve_parallel<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> EvoResult<GenerationStats> {
        let start = Instant::now();
        let run = self.run.as_ref().ok_or(LifecycleError::NotInitialized)?;
        run.population.check_dna_length(run.dna_length)?;

        let client = &self.client;
        let fitness = run
            .population
            .score_parallel(|individual| client.evaluate_fitness(individual))?;

        self.breed(fitness, start, rng)
    }
}

fn check_individual<I: Individual>(
    individual: &I,
    index: usize,
    expected: usize,
) -> Result<(), ContractViolation> {
    let actual = individual.dna().len();
    if actual != expected {
        return Err(ContractViolation::DnaLength {
            index,
            expected,
            actual,
        });
    }
    Ok(())
}

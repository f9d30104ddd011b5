//! End-to-end engine scenarios
//!
//! Each test drives a small deterministic client through the public API and
//! checks one observable behavior of the generation cycle.

use std::collections::HashSet;

use approx::assert_relative_eq;
use gengine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Individual `k` of generation 0 carries genes `[10k, 10k + 1, ...]`
#[derive(Default)]
struct Scripted {
    overrides: ConfigOverrides,
    created: u32,
    /// Individuals whose first gene equals this score 10, the rest 0
    favourite: Option<u32>,
    /// Every individual scores this instead
    fixed: Option<f64>,
    /// Length of the DNA handed out for the second individual
    ragged: Option<usize>,
    /// Individuals built after this many drop their last gene
    shrink_after: Option<usize>,
    individuals_built: usize,
    init_calls: usize,
    ended: Vec<usize>,
}

impl Client for Scripted {
    type Gene = u32;
    type Individual = BasicIndividual<u32>;

    fn configuration(&self) -> ConfigOverrides {
        self.overrides.clone()
    }

    fn on_init(&mut self, _config: &Configuration) {
        self.init_calls += 1;
    }

    fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        rng.gen_range(1_000..2_000)
    }

    fn create_dna<R: Rng + ?Sized>(&mut self, config: &Configuration, _rng: &mut R) -> Dna<u32> {
        let k = self.created;
        self.created += 1;

        let len = match self.ragged {
            Some(len) if k == 1 => len,
            _ => config.dna_size,
        };
        (0..len as u32).map(|i| k * 10 + i).collect()
    }

    fn create_individual(&mut self, dna: Dna<u32>) -> Self::Individual {
        self.individuals_built += 1;
        match self.shrink_after {
            Some(limit) if self.individuals_built > limit => {
                let keep = dna.len().saturating_sub(1);
                BasicIndividual::new(dna.into_iter().take(keep).collect())
            }
            _ => BasicIndividual::new(dna),
        }
    }

    fn evaluate_fitness(&self, individual: &Self::Individual) -> f64 {
        if let Some(value) = self.fixed {
            return value;
        }
        match (self.favourite, individual.dna().get(0)) {
            (Some(favourite), Some(&first)) if first == favourite => 10.0,
            _ => 0.0,
        }
    }

    fn on_generation_end(&mut self, generation: usize, _population: &Population<Self::Individual>) {
        self.ended.push(generation);
    }
}

fn scripted(overrides: ConfigOverrides) -> Scripted {
    Scripted {
        overrides,
        ..Scripted::default()
    }
}

fn snapshot<X: CrossoverOperator<u32>>(engine: &Engine<Scripted, X>) -> Vec<Dna<u32>> {
    engine
        .current_population()
        .unwrap()
        .iter()
        .map(|i| i.dna().clone())
        .collect()
}

/// A failed `evolve` must leave no trace of the attempted generation
fn assert_untouched<X: CrossoverOperator<u32>>(engine: &Engine<Scripted, X>, before: &[Dna<u32>]) {
    assert_eq!(engine.current_generation(), 0);
    assert_eq!(snapshot(engine), before);
    assert!(engine
        .current_population()
        .unwrap()
        .iter()
        .all(|i| !i.is_evaluated()));
    assert_eq!(engine.evaluations(), 0);
    assert!(engine.best().is_none());
    assert!(engine.client().ended.is_empty());
}

#[test]
fn test_children_derive_from_the_only_fit_individual() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(
        ConfigOverrides::new()
            .population_size(4)
            .dna_size(3)
            .mutation_p(0.0),
    );
    // Fitness [0, 0, 0, 10]
    client.favourite = Some(30);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();

    let fit: HashSet<u32> = engine.current_population().unwrap()[3]
        .dna()
        .iter()
        .copied()
        .collect();
    assert_eq!(fit, HashSet::from([30, 31, 32]));

    let stats = engine.evolve(&mut rng).unwrap();
    assert_relative_eq!(stats.best_fitness, 10.0);
    assert_relative_eq!(stats.mean_fitness, 2.5);
    assert!(!stats.uniform_fallback);

    let population = engine.current_population().unwrap();
    assert_eq!(population.len(), 4);
    for child in population {
        assert!(child.dna().iter().all(|gene| fit.contains(gene)));
        assert_eq!(child.dna().genes(), &[30, 31, 32]);
    }
}

#[test]
fn test_negative_fitness_leaves_population_unchanged() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(ConfigOverrides::new().population_size(5).dna_size(4));
    client.fixed = Some(-1.0);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();
    let before = snapshot(&engine);

    let err = engine.evolve(&mut rng).unwrap_err();

    assert!(matches!(
        err,
        EvolutionError::Contract(ContractViolation::InvalidFitness { index: 0, value }) if value == -1.0
    ));
    assert_untouched(&engine, &before);
}

#[test]
fn test_non_finite_fitness_is_a_contract_violation() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(ConfigOverrides::new().population_size(3).dna_size(2));
    client.fixed = Some(f64::NAN);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();

    let err = engine.evolve(&mut rng).unwrap_err();
    assert!(matches!(
        err,
        EvolutionError::Contract(ContractViolation::InvalidFitness { .. })
    ));
}

#[test]
fn test_initialize_twice_is_a_lifecycle_error() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::new(scripted(ConfigOverrides::new().population_size(4).dna_size(3)));
    engine.initialize(&mut rng).unwrap();
    let before = snapshot(&engine);

    let err = engine.initialize(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Lifecycle(LifecycleError::AlreadyInitialized)
    );
    assert_eq!(engine.current_generation(), 0);
    assert_eq!(snapshot(&engine), before);
    assert_eq!(engine.client().init_calls, 1);
}

#[test]
fn test_evolve_before_initialize_is_a_lifecycle_error() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::new(Scripted::default());

    let err = engine.evolve(&mut rng).unwrap_err();

    assert_eq!(err, EvolutionError::Lifecycle(LifecycleError::NotInitialized));
    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert_eq!(engine.current_generation(), 0);
}

#[test]
fn test_zero_population_size_is_rejected_before_on_init() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::new(scripted(ConfigOverrides::new().population_size(0)));

    let err = engine.initialize(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Configuration(ConfigError::InvalidPopulationSize(0))
    );
    assert_eq!(engine.client().init_calls, 0);
    assert_eq!(engine.client().created, 0);
    assert_eq!(engine.state(), EngineState::Uninitialized);
}

#[test]
fn test_overrides_parsed_from_json() {
    let overrides: ConfigOverrides = serde_json::from_str(
        r#"{"population_size": 6, "mutation_p": 0.0, "crossover": "single_point", "window": "800x600"}"#,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::new(scripted(overrides));
    engine.initialize(&mut rng).unwrap();

    let config = engine.configuration().unwrap();
    assert_eq!(config.population_size, 6);
    assert_eq!(config.dna_size, DEFAULT_DNA_SIZE);
    assert_relative_eq!(config.mutation_p, 0.0);
    assert_eq!(config.crossover, CrossoverPolicy::SinglePoint);
    assert_eq!(engine.dna_length(), Some(DEFAULT_DNA_SIZE));
}

#[test]
fn test_inconsistent_initial_dna_is_a_contract_violation() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(ConfigOverrides::new().population_size(4).dna_size(3));
    client.ragged = Some(5);
    let mut engine = Engine::new(client);

    let err = engine.initialize(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Contract(ContractViolation::DnaLength {
            index: 1,
            expected: 3,
            actual: 5,
        })
    );
    assert_eq!(engine.state(), EngineState::Uninitialized);
}

/// Drops the last gene of the first parent
struct Truncating;

impl CrossoverOperator<u32> for Truncating {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Dna<u32>,
        _parent2: &Dna<u32>,
        _rng: &mut R,
    ) -> Result<Dna<u32>, ContractViolation> {
        let keep = parent1.len().saturating_sub(1);
        Ok(parent1.iter().take(keep).copied().collect())
    }

    fn name(&self) -> &'static str {
        "truncating"
    }
}

#[test]
fn test_crossover_output_length_is_checked() {
    let mut rng = StdRng::seed_from_u64(42);
    let client = scripted(ConfigOverrides::new().population_size(4).dna_size(3));
    let mut engine = Engine::with_crossover(client, Truncating);
    engine.initialize(&mut rng).unwrap();
    let before = snapshot(&engine);

    let err = engine.evolve(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Contract(ContractViolation::OperatorOutput {
            operator: "truncating",
            expected: 3,
            actual: 2,
        })
    );
    assert_untouched(&engine, &before);
}

#[test]
fn test_short_individual_from_create_individual_is_rejected() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(
        ConfigOverrides::new()
            .population_size(4)
            .dna_size(3)
            .mutation_p(0.0),
    );
    // Generation 0 is intact, the second child comes back one gene short
    client.shrink_after = Some(5);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();
    let before = snapshot(&engine);

    let err = engine.evolve(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Contract(ContractViolation::DnaLength {
            index: 1,
            expected: 3,
            actual: 2,
        })
    );
    assert_untouched(&engine, &before);
}

#[test]
fn test_huge_fitness_values_still_breed() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(ConfigOverrides::new().population_size(4).dna_size(3));
    client.fixed = Some(f64::MAX);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();

    let stats = engine.evolve(&mut rng).unwrap();

    assert!(!stats.uniform_fallback);
    assert_eq!(stats.best_fitness, f64::MAX);
    assert!(stats.mean_fitness.is_finite());
    assert_eq!(engine.current_generation(), 1);
    assert_eq!(engine.best_fitness(), Some(f64::MAX));
    assert_eq!(engine.current_population().unwrap().len(), 4);
}

#[test]
fn test_all_zero_fitness_still_breeds() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(ConfigOverrides::new().population_size(8).dna_size(3));
    client.fixed = Some(0.0);
    let mut engine = Engine::new(client);
    engine.initialize(&mut rng).unwrap();

    let stats = engine.evolve(&mut rng).unwrap();

    assert!(stats.uniform_fallback);
    assert_relative_eq!(stats.best_fitness, 0.0);
    assert_eq!(engine.current_generation(), 1);
    assert_eq!(engine.current_population().unwrap().len(), 8);
}

#[test]
fn test_selection_only_returns_the_fit_individual() {
    let mut rng = StdRng::seed_from_u64(42);
    let weights = FitnessWeights::from_fitness(&[0.0, 0.0, 0.0, 10.0]).unwrap();
    let selection = RouletteSelection::new();
    let parents = ["a", "b", "c", "d"];

    for _ in 0..10_000 {
        assert_eq!(*selection.select_parent(&parents, &weights, &mut rng), "d");
    }
}

#[test]
fn test_uniform_fallback_distribution() {
    let mut rng = StdRng::seed_from_u64(42);
    let weights = FitnessWeights::from_fitness(&[0.0; 5]).unwrap();
    let selection = RouletteSelection::new();
    let draws = 50_000;

    let mut counts = [0usize; 5];
    for _ in 0..draws {
        counts[selection.select(&weights, &mut rng)] += 1;
    }

    // Chi-squared with 4 degrees of freedom; 18.47 is the 0.999 quantile
    let expected = draws as f64 / 5.0;
    let chi_squared: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    assert!(chi_squared < 18.47, "chi-squared {}", chi_squared);
}

#[test]
fn test_run_reports_best_and_history() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut client = scripted(
        ConfigOverrides::new()
            .population_size(4)
            .dna_size(3)
            .mutation_p(0.0),
    );
    client.favourite = Some(30);
    let mut engine = Engine::new(client);

    let summary = engine.run(&MaxGenerations::new(3), &mut rng).unwrap();

    assert_eq!(summary.generations, 3);
    assert_eq!(summary.history.len(), 3);
    assert_eq!(summary.best_fitness, Some(10.0));
    assert_eq!(summary.best_dna.as_ref().map(|d| d.genes()), Some(&[30, 31, 32][..]));
    assert_eq!(summary.best_fitness_history(), vec![10.0, 10.0, 10.0]);
}

/// Individual whose DNA the client may swap out between generations
struct Shapeshifter {
    dna: Dna<u32>,
    fitness: Option<f64>,
}

impl Individual for Shapeshifter {
    type Gene = u32;

    fn dna(&self) -> &Dna<u32> {
        &self.dna
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

struct Shapeshifters;

impl Client for Shapeshifters {
    type Gene = u32;
    type Individual = Shapeshifter;

    fn configuration(&self) -> ConfigOverrides {
        ConfigOverrides::new().population_size(4).dna_size(3)
    }

    fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        rng.gen_range(0..100)
    }

    fn create_individual(&mut self, dna: Dna<u32>) -> Shapeshifter {
        Shapeshifter { dna, fitness: None }
    }

    fn evaluate_fitness(&self, individual: &Shapeshifter) -> f64 {
        individual.dna().iter().map(|&g| g as f64).sum()
    }
}

#[test]
fn test_ragged_live_population_is_rejected() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::new(Shapeshifters);
    engine.initialize(&mut rng).unwrap();

    engine.individuals_mut().unwrap()[2].dna = Dna::new(vec![7]);
    let before: Vec<Dna<u32>> = engine
        .current_population()
        .unwrap()
        .iter()
        .map(|i| i.dna().clone())
        .collect();

    let err = engine.evolve(&mut rng).unwrap_err();

    assert_eq!(
        err,
        EvolutionError::Contract(ContractViolation::DnaLength {
            index: 2,
            expected: 3,
            actual: 1,
        })
    );
    assert_eq!(engine.current_generation(), 0);
    let population = engine.current_population().unwrap();
    let after: Vec<Dna<u32>> = population.iter().map(|i| i.dna().clone()).collect();
    assert_eq!(after, before);
    assert!(population.iter().all(|i| !i.is_evaluated()));
    assert_eq!(engine.evaluations(), 0);
}

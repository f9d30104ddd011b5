//! Termination criteria
//!
//! The engine itself never stops on its own; `Engine::run` consults a
//! [`TerminationCriterion`] after each generation transition, alongside the
//! client's `is_stop_requested` flag.

/// Snapshot of a run handed to termination criteria
#[derive(Clone, Debug)]
pub struct EvolutionState<'a> {
    /// Generation counter after the latest `evolve`
    pub generation: usize,
    /// Fitness evaluations performed so far
    pub evaluations: usize,
    /// Best fitness seen during the run
    pub best_fitness: f64,
    /// Best fitness of each evaluated generation, oldest first
    pub fitness_history: &'a [f64],
}

/// Termination criterion trait
pub trait TerminationCriterion: Send + Sync {
    /// Check if the run should stop
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool;

    /// Why the run stopped
    fn reason(&self) -> &'static str;
}

/// Stop once the generation counter reaches a limit
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxGenerations {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Stop after a number of fitness evaluations
#[derive(Clone, Debug)]
pub struct MaxEvaluations(pub usize);

impl MaxEvaluations {
    /// Create a new max evaluations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxEvaluations {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        state.evaluations >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum evaluations reached"
    }
}

/// Stop when the best fitness reaches a target
#[derive(Clone, Debug)]
pub struct TargetFitness {
    pub target: f64,
    pub tolerance: f64,
}

impl TargetFitness {
    /// Create a new target fitness criterion
    pub fn new(target: f64) -> Self {
        Self {
            target,
            tolerance: 0.0,
        }
    }

    /// Create with a tolerance below the target
    pub fn with_tolerance(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }
}

impl TerminationCriterion for TargetFitness {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        state.best_fitness >= self.target - self.tolerance
    }

    fn reason(&self) -> &'static str {
        "Target fitness reached"
    }
}

/// Stop when the per-generation best fitness stops moving
///
/// Looks at the last `window` entries of the history and stops when the
/// spread between the first and last is below `epsilon`.
#[derive(Clone, Debug)]
pub struct FitnessStagnation {
    pub window: usize,
    pub epsilon: f64,
}

impl FitnessStagnation {
    /// Create a new stagnation criterion
    pub fn new(window: usize, epsilon: f64) -> Self {
        Self { window, epsilon }
    }
}

impl TerminationCriterion for FitnessStagnation {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        let history = state.fitness_history;
        if self.window == 0 || history.len() < self.window {
            return false;
        }

        let recent = &history[history.len() - self.window..];
        match (recent.first(), recent.last()) {
            (Some(first), Some(last)) => (last - first).abs() < self.epsilon,
            _ => false,
        }
    }

    fn reason(&self) -> &'static str {
        "Fitness stagnation detected"
    }
}

/// Stop when any of several criteria fires
pub struct AnyOf {
    criteria: Vec<Box<dyn TerminationCriterion>>,
}

impl AnyOf {
    /// Create from a list of criteria
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion>>) -> Self {
        Self { criteria }
    }

    /// The first criterion that fires for `state`, if any
    pub fn triggered(&self, state: &EvolutionState<'_>) -> Option<&dyn TerminationCriterion> {
        self.criteria
            .iter()
            .find(|c| c.should_terminate(state))
            .map(|c| c.as_ref())
    }
}

impl TerminationCriterion for AnyOf {
    fn should_terminate(&self, state: &EvolutionState<'_>) -> bool {
        self.triggered(state).is_some()
    }

    fn reason(&self) -> &'static str {
        "One of multiple criteria met"
    }
}

/// Never stop; the run ends only when the client requests it
#[derive(Clone, Debug, Default)]
pub struct Never;

impl TerminationCriterion for Never {
    fn should_terminate(&self, _state: &EvolutionState<'_>) -> bool {
        false
    }

    fn reason(&self) -> &'static str {
        "Never"
    }
}

pub mod prelude {
    pub use super::{
        AnyOf, EvolutionState, FitnessStagnation, MaxEvaluations, MaxGenerations, Never,
        TargetFitness, TerminationCriterion,
    };
}

//! Error types for gengine
//!
//! This module defines all error types used throughout the engine. Every
//! error is unrecoverable at the point of detection and is returned to the
//! caller of `initialize`/`evolve`; the engine never retries.

use thiserror::Error;

/// A configuration value outside its domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Population size must be positive
    #[error("population_size must be greater than zero, got {0}")]
    InvalidPopulationSize(usize),

    /// DNA size must be positive
    #[error("dna_size must be greater than zero, got {0}")]
    InvalidDnaSize(usize),

    /// Mutation probability must lie in [0, 1]
    #[error("mutation_p must be a finite value in [0, 1], got {0}")]
    InvalidMutationProbability(f64),
}

/// An engine operation called from the wrong state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// `initialize` was called on an engine that is already running
    #[error("engine is already initialized")]
    AlreadyInitialized,

    /// An operation that needs a population was called before `initialize`
    #[error("engine has not been initialized")]
    NotInitialized,
}

/// Client code broke the callback contract
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractViolation {
    /// `evaluate_fitness` returned a negative, NaN or infinite value
    #[error("invalid fitness {value} for individual {index}: must be finite and non-negative")]
    InvalidFitness { index: usize, value: f64 },

    /// An individual's DNA does not have the length established at generation 0
    #[error("DNA length mismatch for individual {index}: expected {expected}, got {actual}")]
    DnaLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Two parents handed to a crossover operator differ in length
    #[error("parent DNA lengths differ: {left} vs {right}")]
    ParentLength { left: usize, right: usize },

    /// An operator produced a child of the wrong length
    #[error("{operator} produced DNA of length {actual}, expected {expected}")]
    OperatorOutput {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Top-level error type for engine operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Operation not valid in the current engine state
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Client contract violation
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

/// Result type alias for engine operations
pub type EvoResult<T> = Result<T, EvolutionError>;

//! Diagnostics and statistics
//!
//! This module provides per-generation statistics and the summary of a
//! complete run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::genome::dna::Dna;

/// Statistics for a single evaluated generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Number of individuals evaluated
    pub population_size: usize,
    /// Best fitness in this generation
    pub best_fitness: f64,
    /// Worst fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Fitness standard deviation
    pub fitness_std: f64,
    /// Whether every fitness was zero and parents were drawn uniformly
    pub uniform_fallback: bool,
    /// Wall time spent on the generation transition (ms)
    pub elapsed_ms: f64,
}

impl GenerationStats {
    /// Compute statistics from the fitness values of one generation
    pub fn from_fitness(generation: usize, fitness: &[f64], uniform_fallback: bool) -> Self {
        if fitness.is_empty() {
            return Self {
                generation,
                population_size: 0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                mean_fitness: 0.0,
                fitness_std: 0.0,
                uniform_fallback,
                elapsed_ms: 0.0,
            };
        }

        let n = fitness.len() as f64;
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        // Work relative to the largest magnitude so huge values cannot overflow
        let magnitude = fitness.iter().fold(0.0f64, |m, f| m.max(f.abs()));
        let scale = if magnitude > 0.0 { magnitude } else { 1.0 };
        let scaled_mean = fitness.iter().map(|f| f / scale).sum::<f64>() / n;
        let scaled_variance = if fitness.len() > 1 {
            fitness
                .iter()
                .map(|f| (f / scale - scaled_mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        } else {
            0.0
        };
        let mean = scaled_mean * scale;
        let std = scaled_variance.sqrt() * scale;

        Self {
            generation,
            population_size: fitness.len(),
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: mean,
            fitness_std: std,
            uniform_fallback,
            elapsed_ms: 0.0,
        }
    }

    /// Set the elapsed time
    pub fn with_elapsed(mut self, duration: Duration) -> Self {
        self.elapsed_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

/// Outcome of `Engine::run`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionSummary<G> {
    /// Generation counter when the run stopped
    pub generations: usize,
    /// DNA of the best individual evaluated during the run
    pub best_dna: Option<Dna<G>>,
    /// Fitness of that individual
    pub best_fitness: Option<f64>,
    /// Statistics per evaluated generation
    pub history: Vec<GenerationStats>,
    /// Why the run stopped
    pub termination_reason: Option<String>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
}

impl<G> EvolutionSummary<G> {
    /// Best fitness of each evaluated generation, in order
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|g| g.best_fitness).collect()
    }

    /// Mean fitness of each evaluated generation, in order
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|g| g.mean_fitness).collect()
    }

    /// Human-readable summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Evolution Summary:\n\
             - Generations: {}\n\
             - Best fitness: {:.6}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            self.generations,
            self.best_fitness.unwrap_or(f64::NAN),
            self.total_runtime_ms,
            self.termination_reason.as_deref().unwrap_or("unknown")
        )
    }
}

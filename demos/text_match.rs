//! Text Matching
//!
//! Evolves random strings of lowercase letters and spaces towards a target
//! phrase. Each gene is one character; fitness grows quadratically with the
//! number of characters already in place.
//!
//! Run with `RUST_LOG=gengine=debug` to see per-generation statistics.

use gengine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";

struct TextClient {
    target: Vec<char>,
    generation: usize,
    solved_at: Option<usize>,
}

impl TextClient {
    fn new(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            generation: 0,
            solved_at: None,
        }
    }

    fn matches(&self, dna: &Dna<char>) -> usize {
        dna.iter()
            .zip(&self.target)
            .filter(|(gene, wanted)| gene == wanted)
            .count()
    }
}

impl Client for TextClient {
    type Gene = char;
    type Individual = BasicIndividual<char>;

    fn configuration(&self) -> ConfigOverrides {
        ConfigOverrides::new()
            .population_size(64)
            .dna_size(self.target.len())
            .mutation_p(0.01)
    }

    fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> char {
        ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
    }

    fn create_individual(&mut self, dna: Dna<char>) -> Self::Individual {
        BasicIndividual::with_generation(dna, self.generation)
    }

    fn evaluate_fitness(&self, individual: &Self::Individual) -> f64 {
        let score = 1.0 + 10.0 * self.matches(individual.dna()) as f64;
        score * score
    }

    fn on_generation_begin(&mut self, generation: usize) {
        self.generation = generation;
    }

    fn on_generation_end(&mut self, generation: usize, population: &Population<Self::Individual>) {
        if self.solved_at.is_some() {
            return;
        }
        if let Some(best) = population.best() {
            if self.matches(best.dna()) == self.target.len() {
                self.solved_at = Some(generation);
            }
        }
    }

    fn is_stop_requested(&self) -> bool {
        self.solved_at.is_some()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Text Matching ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let target = "to be or not to be";

    let mut engine = Engine::new(TextClient::new(target));
    let summary = engine.run(&MaxGenerations::new(5_000), &mut rng)?;

    let best: String = summary
        .best_dna
        .as_ref()
        .map(|dna| dna.iter().collect())
        .unwrap_or_default();

    println!("Target:      {:?}", target);
    println!("Best found:  {:?}", best);
    match engine.client().solved_at {
        Some(generation) => println!("Solved in generation {}", generation),
        None => println!("Not solved"),
    }
    println!("\n{}", summary.summary());

    Ok(())
}

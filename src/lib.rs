//! # gengine
//!
//! A small generational genetic algorithm engine.
//!
//! The engine owns the evolutionary core (population lifecycle,
//! fitness-proportionate parent selection, crossover, mutation and the
//! generation-advance state machine) and defers everything domain-specific
//! to a [`Client`](engine::Client): what a gene is, how an individual is
//! built from its DNA, and how fitness is scored.
//!
//! ## Core Concepts
//!
//! - **Opaque genes**: the engine clones and recombines genes but never
//!   inspects them; fresh genes always come from the client.
//! - **Whole-generation replacement**: every `evolve` builds a new
//!   population from roulette-wheel draws over the previous one.
//! - **Caller-driven pacing**: one generation per call, with arbitrary
//!   client work (simulation, rendering) in between.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gengine::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut engine = Engine::new(MyClient::default());
//! engine.initialize(&mut rng)?;
//! while !done {
//!     simulate(engine.individuals_mut()?);
//!     engine.evolve(&mut rng)?;
//! }
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::diagnostics::*;
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}

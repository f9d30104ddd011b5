//! Headless Steering
//!
//! A population of creatures learns to fly from a launch point to a target
//! while avoiding obstacles. Each gene is the thrust applied during one
//! simulation step, so the DNA is a full flight plan.
//!
//! The arena lives in an explicit [`World`] owned by the client; between
//! generations the engine hands the live creatures to `simulate`, which flies
//! every one of them to completion before fitness is scored.

use gengine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, UnitCircle};
use tracing_subscriber::EnvFilter;

const FORCE_FACTOR: f64 = 15.0;
const DRAG: f64 = 2.0;
const DT: f64 = 1.0 / 60.0;
const CREATURE_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    fn distance(self, other: Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Circular region of the arena
#[derive(Clone, Debug)]
struct Disc {
    center: Vec2,
    radius: f64,
}

impl Disc {
    fn touches(&self, pos: Vec2, radius: f64) -> bool {
        pos.distance(self.center) < self.radius + radius
    }
}

/// Arena shared by every creature of a generation
#[derive(Clone, Debug)]
struct World {
    width: f64,
    height: f64,
    start: Vec2,
    target: Disc,
    obstacles: Vec<Disc>,
}

impl World {
    fn arena() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            start: Vec2::new(400.0, 500.0),
            target: Disc {
                center: Vec2::new(400.0, 80.0),
                radius: 20.0,
            },
            obstacles: vec![
                Disc {
                    center: Vec2::new(400.0, 300.0),
                    radius: 60.0,
                },
                Disc {
                    center: Vec2::new(220.0, 200.0),
                    radius: 40.0,
                },
            ],
        }
    }

    fn out_of_bounds(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Outcome {
    Flying,
    Crashed(usize),
    Arrived(usize),
}

/// One creature: its flight plan plus the state of its last flight
#[derive(Clone, Debug)]
struct Creature {
    dna: Dna<Vec2>,
    fitness: Option<f64>,
    pos: Vec2,
    velocity: Vec2,
    outcome: Outcome,
}

impl Creature {
    fn launch(&mut self, start: Vec2) {
        self.pos = start;
        self.velocity = Vec2::default();
        self.outcome = Outcome::Flying;
    }

    fn step(&mut self, world: &World, tick: usize) {
        if self.outcome != Outcome::Flying {
            return;
        }

        let thrust = self.dna.get(tick).copied().unwrap_or_default();
        let accel = thrust.add(self.velocity.scaled(-DRAG));
        self.velocity = self.velocity.add(accel.scaled(DT));
        self.pos = self.pos.add(self.velocity);

        if world.target.touches(self.pos, CREATURE_RADIUS) {
            self.outcome = Outcome::Arrived(tick);
        } else if world.out_of_bounds(self.pos)
            || world
                .obstacles
                .iter()
                .any(|o| o.touches(self.pos, CREATURE_RADIUS))
        {
            self.outcome = Outcome::Crashed(tick);
        }
    }
}

impl Individual for Creature {
    type Gene = Vec2;

    fn dna(&self) -> &Dna<Vec2> {
        &self.dna
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

struct SteeringClient {
    world: World,
    steps: usize,
    arrivals: Vec<usize>,
    best_arrival: Option<usize>,
    stop_after: usize,
}

impl SteeringClient {
    fn new(world: World) -> Self {
        Self {
            world,
            steps: 250,
            arrivals: Vec::new(),
            best_arrival: None,
            stop_after: 0,
        }
    }

    /// Fraction of the flight elapsed at `tick`, in (0, 1]
    fn arrival_factor(&self, tick: usize) -> f64 {
        (tick + 1) as f64 / self.steps as f64
    }
}

impl Client for SteeringClient {
    type Gene = Vec2;
    type Individual = Creature;

    fn configuration(&self) -> ConfigOverrides {
        ConfigOverrides::new()
            .population_size(100)
            .dna_size(self.steps)
            .mutation_p(0.001)
    }

    fn create_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec2 {
        let [x, y] = UnitCircle.sample(rng);
        Vec2::new(x, y).scaled(rng.gen::<f64>() * FORCE_FACTOR)
    }

    fn create_individual(&mut self, dna: Dna<Vec2>) -> Creature {
        Creature {
            dna,
            fitness: None,
            pos: self.world.start,
            velocity: Vec2::default(),
            outcome: Outcome::Flying,
        }
    }

    fn evaluate_fitness(&self, creature: &Creature) -> f64 {
        let distance = creature.pos.distance(self.world.target.center).max(1.0);
        let fitness = 1.0 / (distance * distance);

        match creature.outcome {
            Outcome::Flying => fitness,
            // Early crashes are punished harder
            Outcome::Crashed(tick) => fitness * self.arrival_factor(tick).powi(3),
            Outcome::Arrived(tick) => fitness / self.arrival_factor(tick).powi(3),
        }
    }

    fn simulate(&mut self, _generation: usize, creatures: &mut [Creature]) {
        for creature in creatures.iter_mut() {
            creature.launch(self.world.start);
        }
        for tick in 0..self.steps {
            for creature in creatures.iter_mut() {
                creature.step(&self.world, tick);
            }
        }
    }

    fn on_generation_end(&mut self, generation: usize, population: &Population<Creature>) {
        let mut arrived = 0;
        for creature in population {
            if let Outcome::Arrived(tick) = creature.outcome {
                arrived += 1;
                if self.best_arrival.map_or(true, |best| tick < best) {
                    self.best_arrival = Some(tick);
                }
            }
        }
        self.arrivals.push(arrived);

        println!(
            "Generation {:4}: {:3} arrived, best time {}",
            generation,
            arrived,
            self.best_arrival
                .map(|tick| format!("{:.3}s", (tick + 1) as f64 * DT))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    fn is_stop_requested(&self) -> bool {
        // Stop once most of the flock makes it
        self.arrivals
            .last()
            .is_some_and(|arrived| *arrived >= self.stop_after)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Headless Steering ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let mut client = SteeringClient::new(World::arena());
    client.stop_after = 90;

    let mut engine = Engine::new(client);
    let summary = engine.run(&MaxGenerations::new(300), &mut rng)?;

    println!("\n{}", summary.summary());
    println!(
        "Obstacles: {}, arrivals per generation: {:?}",
        engine.client().world.obstacles.len(),
        engine.client().arrivals.iter().rev().take(5).collect::<Vec<_>>()
    );

    Ok(())
}

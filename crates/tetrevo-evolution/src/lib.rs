//! Evolution loop driving many game instances in parallel.
//!
//! The [`EvolutionController`] owns a fixed population of (agent, game)
//! slots and advances them in lockstep: on every tick each live agent runs
//! one best-move cycle, then every game receives one synchronized gravity
//! step. A round ends when every game has topped out; selection keeps the
//! top-scoring half, the champion is carried over unchanged, and every other
//! slot is refilled with a crossover child of the champion and a random
//! survivor.
//!
//! Everything is single threaded and frame stepped. The controller never
//! blocks; an external clock decides how often [`EvolutionController::tick`]
//! runs. Reseeding happens only at tick boundaries, never mid-placement.
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::RngSeed;
//! use tetrevo_evolution::{EvolutionConfig, EvolutionController};
//!
//! let config = EvolutionConfig {
//!     population_size: 4,
//!     ..EvolutionConfig::default()
//! };
//! let mut controller = EvolutionController::new(config, RngSeed::new([1; 16])).unwrap();
//! if let Some(summary) = controller.run_generation(10_000).unwrap() {
//!     println!("generation {} champion: {}", summary.generation, summary.champion_score);
//! }
//! ```

pub use self::{controller::*, record::*};

mod controller;
mod record;

//! Heuristic placement agent for the tetrevo engine.
//!
//! An [`Agent`] carries a [`HeuristicWeights`] vector and, for the current
//! falling shape, sweeps every reachable (rotation, column) placement through
//! the board's what-if evaluation to pick the highest-scoring one. The
//! winning move is executed through the engine's discrete command set, the
//! same one interactive play uses.
//!
//! Agents also provide the two genetic operators the evolution loop needs:
//! value mutation and per-weight crossover. An agent is never mutated in
//! place; reproduction always builds a fresh weight vector.

pub use self::{agent::*, weights::*};

mod agent;
mod weights;

use serde::{Deserialize, Serialize};

/// Immutable game configuration.
///
/// A `GameConfig` is passed into every constructor that needs grid dimensions
/// or scoring parameters. There is no process-wide settings state, so multiple
/// differently configured simulations can run side by side and tests can pick
/// small grids for fast, deterministic scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of rows in the playable grid.
    pub rows: usize,
    /// Number of columns in the playable grid.
    pub cols: usize,
    /// Score trickle awarded for every successful gravity step.
    pub step_score_gain: f64,
    /// Base of the exponential line-clear bonus (`base^lines`).
    pub line_score_base: f64,
    /// Reference weights for the board-quality fitness readout.
    pub fitness_weights: FitnessWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            step_score_gain: 0.001,
            line_score_base: 5.0,
            fitness_weights: FitnessWeights::default(),
        }
    }
}

/// Fixed weights used to report a fitness figure for a board state.
///
/// These are display/diagnostic weights, distinct from the evolving weight
/// vectors of the AI agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub aggregate_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
    pub lines_cleared: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.3,
            holes: -0.75,
            bumpiness: -0.18,
            lines_cleared: 1.3,
        }
    }
}

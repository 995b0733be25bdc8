//! Game-level logic on top of the core data structures.
//!
//! - [`Game`] owns one board, one falling shape, and one shape bag, tracks
//!   score, lines, fitness, and game over, and exposes the discrete command
//!   set (`shift`, `rotate`, `step_down`, `hard_drop`, `reset`). Interactive
//!   input and the AI search both funnel through these commands, so manual
//!   and automated play share semantics.
//! - [`ShapeBag`] draws shapes from a shuffled double bag (every kind twice
//!   per refill) backed by a seedable generator, see [`RngSeed`].
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::{Direction, Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default());
//! game.shift(Direction::Left);
//! game.step_down().unwrap();
//! assert!(!game.is_game_over());
//! ```

pub use self::{game::*, shape_bag::*};

mod game;
mod shape_bag;

use rand::Rng as _;

use crate::{
    StepError,
    config::GameConfig,
    core::{
        board::Board,
        piece::{Direction, ShapeKind, Turn},
        shape::{DropStep, Shape},
    },
};

use super::shape_bag::{RngSeed, ShapeBag};

/// One self-contained game instance.
///
/// A `Game` owns its board, its shape bag, and the falling shape, and is the
/// only mutation entry point for all of them. Commands are ignored once the
/// game is over; game over is a normal terminal state, reached when a drop
/// step cannot legally write the shape into the board.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    bag: ShapeBag,
    current: Shape,
    score: f64,
    lines: u32,
    fitness: f64,
    game_over: bool,
    high_score: f64,
    high_score_lines: u32,
}

impl Game {
    /// Creates a game with a bag seed drawn from the thread generator.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates a game with a deterministic shape sequence.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: RngSeed) -> Self {
        let mut bag = ShapeBag::with_seed(seed);
        let current = Shape::spawn(bag.pop_next(), &config);
        Self {
            config,
            board: Board::new(&config),
            bag,
            current,
            score: 0.0,
            lines: 0,
            fitness: 0.0,
            game_over: false,
            high_score: 0.0,
            high_score_lines: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_shape(&self) -> &Shape {
        &self.current
    }

    /// The kind the next spawn will use.
    #[must_use]
    pub fn next_kind(&self) -> ShapeKind {
        self.bag.peek()
    }

    /// Preview of the upcoming shape kinds in draw order.
    pub fn upcoming_kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.bag.upcoming()
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Board-quality readout computed from the config's reference weights
    /// after every completed placement.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Best score of any previous round on this instance.
    #[must_use]
    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    #[must_use]
    pub fn high_score_lines(&self) -> u32 {
        self.high_score_lines
    }

    /// Moves the falling shape one column sideways; returns whether it moved.
    pub fn shift(&mut self, direction: Direction) -> bool {
        if self.game_over {
            return false;
        }
        self.current.shift(&self.board, direction)
    }

    /// Rotates the falling shape in place; returns whether it turned.
    pub fn rotate(&mut self, turn: Turn) -> bool {
        if self.game_over {
            return false;
        }
        self.current.turn(&self.board, turn)
    }

    /// One gravity step.
    ///
    /// A descending shape earns the per-step score trickle. A shape that
    /// reaches its resting position is committed, full rows are removed and
    /// scored, and the next shape spawns. A shape that cannot be committed
    /// ends the game.
    pub fn step_down(&mut self) -> Result<(), StepError> {
        if self.game_over {
            return Ok(());
        }
        match self.current.step_down(&mut self.board)? {
            DropStep::Descended => self.score += self.config.step_score_gain,
            DropStep::Placed => self.finish_placement()?,
            DropStep::Rejected => self.game_over = true,
        }
        Ok(())
    }

    /// Drops the falling shape all the way and commits it immediately.
    pub fn hard_drop(&mut self) -> Result<(), StepError> {
        if self.game_over {
            return Ok(());
        }
        if self.current.place(&mut self.board)? {
            self.finish_placement()?;
        } else {
            self.game_over = true;
        }
        Ok(())
    }

    /// Starts a fresh round on the same instance.
    ///
    /// The board is cleared, score and lines move into the high-score fields,
    /// and the next shape spawns from the continuing bag stream.
    pub fn reset(&mut self) {
        self.board.reset();
        self.high_score = self.score;
        self.high_score_lines = self.lines;
        self.score = 0.0;
        self.lines = 0;
        self.fitness = 0.0;
        self.game_over = false;
        self.current = Shape::spawn(self.bag.pop_next(), &self.config);
    }

    fn finish_placement(&mut self) -> Result<(), StepError> {
        let cleared = self.board.remove_full_rows()?;
        self.fitness = self.fitness_score(cleared);
        if cleared > 0 {
            self.score += self
                .config
                .line_score_base
                .powi(i32::try_from(cleared).unwrap_or(i32::MAX));
            self.lines += u32::try_from(cleared).unwrap_or(u32::MAX);
        }
        self.current = Shape::spawn(self.bag.pop_next(), &self.config);
        Ok(())
    }

    #[expect(clippy::cast_precision_loss)]
    fn fitness_score(&self, cleared: usize) -> f64 {
        let weights = self.config.fitness_weights;
        let total_height: i32 = self.board.col_heights().iter().sum();
        weights.aggregate_height * f64::from(total_height)
            + weights.holes * f64::from(self.board.hole_count())
            + weights.bumpiness * f64::from(self.board.bumpiness())
            + weights.lines_cleared * cleared as f64
    }
}

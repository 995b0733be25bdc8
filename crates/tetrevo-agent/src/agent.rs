use rand::Rng;
use tetrevo_engine::{Board, BoardError, Direction, Game, Shape, Turn, rotated_cells};

use crate::weights::HeuristicWeights;

/// The placement chosen by [`Agent::best_move`].
///
/// `rotations` counts discrete left turns from the shape's current
/// orientation; `shift` is the signed column offset from its current x
/// position (negative means left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMove {
    pub rotations: usize,
    pub shift: i32,
    pub score: f64,
}

/// A heuristic player: one weight vector and the search that applies it.
///
/// Agents own no board state. They query and command the game instance they
/// are handed, which keeps every (agent, game) pair a self-contained unit.
#[derive(Debug, Clone)]
pub struct Agent {
    weights: HeuristicWeights,
}

impl Agent {
    #[must_use]
    pub const fn from_weights(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Creates an agent with uniformly random weights.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_weights(HeuristicWeights::random(rng))
    }

    #[must_use]
    pub const fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Exhaustively scores every reachable (rotation, column) placement of
    /// the shape and returns the best one.
    ///
    /// The sweep copies the cell matrix and rotates the copy left between
    /// orientation passes; after the final pass the candidate is back at the
    /// starting orientation and the live shape was never touched. Ties are
    /// broken by strict comparison, so the first maximum wins: earliest
    /// rotation, then leftmost column. When no placement is valid the result
    /// keeps `rotations: 0, shift: 0` with a score of negative infinity.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn best_move(&self, board: &Board, shape: &Shape) -> Result<BestMove, BoardError> {
        let mut cells = shape.cells().to_vec();
        let mut best = BestMove {
            rotations: 0,
            shift: 0,
            score: f64::NEG_INFINITY,
        };
        for rotation in 0..shape.kind().distinct_rotations() {
            let width = cells.len() as i32;
            for x in 0..=(board.cols() as i32 - width) {
                let eval = board.evaluate_position(&cells, x, shape.y())?;
                if !eval.valid {
                    continue;
                }
                let score = self.weights.score_position(&eval);
                if score > best.score {
                    best = BestMove {
                        rotations: rotation,
                        shift: x - shape.x(),
                        score,
                    };
                }
            }
            cells = rotated_cells(&cells, Turn::Left);
        }
        Ok(best)
    }

    /// Computes the best move for the current shape and executes it through
    /// the game's command set: discrete left turns, then discrete shifts.
    ///
    /// No-op when the game is already over.
    pub fn play_turn(&self, game: &mut Game) -> Result<(), BoardError> {
        if game.is_game_over() {
            return Ok(());
        }
        let best = self.best_move(game.board(), game.current_shape())?;
        for _ in 0..best.rotations {
            game.rotate(Turn::Left);
        }
        let direction = if best.shift < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        for _ in 0..best.shift.unsigned_abs() {
            game.shift(direction);
        }
        Ok(())
    }

    /// Perturbs a single value with probability equal to the own mutation
    /// rate: `(value ± rate) / 2` with random sign, else the value unchanged.
    pub fn mutate_value<R>(&self, value: f64, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        if self.weights.mutation_rate > rng.random::<f64>() {
            (value + sign * self.weights.mutation_rate) / 2.0
        } else {
            value
        }
    }

    /// Produces a child weight vector from two parents.
    ///
    /// Each of the five scalars is drawn independently: with probability 1/2
    /// a mutated sample of this agent's value, otherwise a mutated sample of
    /// the other agent's value. Each parent's own mutation rate governs its
    /// own contribution.
    pub fn crossover<R>(&self, other: &Agent, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        let weights = HeuristicWeights {
            lines_cleared: self.blend(other, |w| w.lines_cleared, rng),
            aggregate_height: self.blend(other, |w| w.aggregate_height, rng),
            holes: self.blend(other, |w| w.holes, rng),
            bumpiness: self.blend(other, |w| w.bumpiness, rng),
            mutation_rate: self.blend(other, |w| w.mutation_rate, rng),
        };
        Agent::from_weights(weights)
    }

    fn blend<R, F>(&self, other: &Agent, field: F, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
        F: Fn(&HeuristicWeights) -> f64,
    {
        if rng.random_bool(0.5) {
            self.mutate_value(field(&self.weights), rng)
        } else {
            other.mutate_value(field(&other.weights), rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use tetrevo_engine::{GameConfig, RngSeed, ShapeKind};

    use super::*;

    fn reference_weights() -> HeuristicWeights {
        HeuristicWeights {
            lines_cleared: 1.3,
            aggregate_height: -0.3,
            holes: -0.75,
            bumpiness: -0.18,
            mutation_rate: 0.0,
        }
    }

    #[test]
    fn test_best_move_for_o_piece_prefers_the_wall() {
        let config = GameConfig::default();
        let board = Board::new(&config);
        let shape = Shape::spawn(ShapeKind::O, &config);
        let agent = Agent::from_weights(reference_weights());

        let best = agent.best_move(&board, &shape).unwrap();
        // On an empty board every O placement scores the same except for
        // bumpiness, which is halved against a wall. The leftmost of the two
        // wall columns wins the tie.
        assert_eq!(best.rotations, 0);
        assert_eq!(best.shift, -5);
    }

    #[test]
    fn test_best_move_is_exhaustive_for_the_o_piece() {
        let config = GameConfig::default();
        let board = Board::new(&config);
        let shape = Shape::spawn(ShapeKind::O, &config);
        let agent = Agent::from_weights(reference_weights());

        let best = agent.best_move(&board, &shape).unwrap();

        // Brute force over every column with the same scoring function.
        let cells = shape.cells().to_vec();
        let mut expected_score = f64::NEG_INFINITY;
        for x in 0..=8 {
            let eval = board.evaluate_position(&cells, x, shape.y()).unwrap();
            assert!(eval.valid);
            let score = agent.weights().score_position(&eval);
            expected_score = expected_score.max(score);
        }
        assert_eq!(best.score, expected_score);
    }

    #[test]
    fn test_best_move_sweep_restores_orientation() {
        let config = GameConfig::default();
        let board = Board::new(&config);
        let shape = Shape::spawn(ShapeKind::J, &config);
        let before = shape.cells().to_vec();
        let agent = Agent::from_weights(reference_weights());

        agent.best_move(&board, &shape).unwrap();
        assert_eq!(shape.cells(), &before[..]);
    }

    #[test]
    fn test_play_turn_reaches_the_searched_placement() {
        let config = GameConfig::default();
        let mut game = Game::with_seed(config, RngSeed::new([17; 16]));
        let agent = Agent::from_weights(reference_weights());

        let best = agent
            .best_move(game.board(), game.current_shape())
            .unwrap();
        let expected_x = game.current_shape().x() + best.shift;
        agent.play_turn(&mut game).unwrap();
        assert_eq!(game.current_shape().x(), expected_x);
    }

    #[test]
    fn test_mutate_value_with_zero_rate_is_identity() {
        let agent = Agent::from_weights(reference_weights());
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(agent.mutate_value(0.4, &mut rng), 0.4);
        }
    }

    #[test]
    fn test_mutate_value_with_full_rate_always_perturbs() {
        let mut weights = reference_weights();
        weights.mutation_rate = 1.0;
        let agent = Agent::from_weights(weights);
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..50 {
            let mutated = agent.mutate_value(0.4, &mut rng);
            assert!(mutated == 0.7 || mutated == -0.3, "{mutated}");
        }
    }

    #[test]
    fn test_mutation_keeps_weights_in_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let agent = Agent::random(&mut rng);
            for _ in 0..20 {
                let value = rng.random_range(-1.0..=1.0);
                let mutated = agent.mutate_value(value, &mut rng);
                assert!((-1.0..=1.0).contains(&mutated));
            }
        }
    }

    #[test]
    fn test_crossover_without_mutation_picks_parent_values() {
        let a = Agent::from_weights(HeuristicWeights {
            lines_cleared: 0.1,
            aggregate_height: 0.2,
            holes: 0.3,
            bumpiness: 0.4,
            mutation_rate: 0.0,
        });
        let b = Agent::from_weights(HeuristicWeights {
            lines_cleared: -0.1,
            aggregate_height: -0.2,
            holes: -0.3,
            bumpiness: -0.4,
            mutation_rate: 0.0,
        });
        let mut rng = Pcg32::seed_from_u64(6);
        for _ in 0..20 {
            let child = a.crossover(&b, &mut rng);
            let w = child.weights();
            assert!(w.lines_cleared == 0.1 || w.lines_cleared == -0.1);
            assert!(w.aggregate_height == 0.2 || w.aggregate_height == -0.2);
            assert!(w.holes == 0.3 || w.holes == -0.3);
            assert!(w.bumpiness == 0.4 || w.bumpiness == -0.4);
            assert_eq!(w.mutation_rate, 0.0);
        }
    }

    #[test]
    fn test_crossover_mixes_both_parents() {
        let a = Agent::from_weights(HeuristicWeights {
            lines_cleared: 1.0,
            aggregate_height: 1.0,
            holes: 1.0,
            bumpiness: 1.0,
            mutation_rate: 0.0,
        });
        let b = Agent::from_weights(HeuristicWeights {
            lines_cleared: -1.0,
            aggregate_height: -1.0,
            holes: -1.0,
            bumpiness: -1.0,
            mutation_rate: 0.0,
        });
        let mut rng = Pcg32::seed_from_u64(7);
        let mut saw_a = false;
        let mut saw_b = false;
        for _ in 0..50 {
            let child = a.crossover(&b, &mut rng);
            saw_a |= child.weights().lines_cleared == 1.0;
            saw_b |= child.weights().lines_cleared == -1.0;
        }
        assert!(saw_a && saw_b);
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};
use tetrevo_engine::PositionEvaluation;

/// Heuristic weight vector steering placement selection.
///
/// The four board weights live in `[-1, 1]`; the mutation rate lives in
/// `[0, 1]` and doubles as the magnitude of a mutation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub lines_cleared: f64,
    pub aggregate_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
    /// Probability that a weight is perturbed during reproduction, and the
    /// size of the perturbation when it happens.
    pub mutation_rate: f64,
}

impl HeuristicWeights {
    /// Draws a uniformly random weight vector.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            lines_cleared: rng.random_range(-1.0..=1.0),
            aggregate_height: rng.random_range(-1.0..=1.0),
            holes: rng.random_range(-1.0..=1.0),
            bumpiness: rng.random_range(-1.0..=1.0),
            mutation_rate: rng.random_range(0.0..=1.0),
        }
    }

    /// Scores a hypothetical placement.
    ///
    /// The lines-cleared term is raised to the fifth power, so multi-line
    /// clears dominate single clears by orders of magnitude.
    #[must_use]
    pub fn score_position(&self, eval: &PositionEvaluation) -> f64 {
        self.lines_cleared * f64::from(eval.lines_cleared).powi(5)
            + self.aggregate_height * f64::from(eval.total_height)
            + self.holes * f64::from(eval.hole_count)
            + self.bumpiness * f64::from(eval.bumpiness)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_weights_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let weights = HeuristicWeights::random(&mut rng);
            for w in [
                weights.lines_cleared,
                weights.aggregate_height,
                weights.holes,
                weights.bumpiness,
            ] {
                assert!((-1.0..=1.0).contains(&w));
            }
            assert!((0.0..=1.0).contains(&weights.mutation_rate));
        }
    }

    #[test]
    fn test_score_position_applies_the_fifth_power() {
        let weights = HeuristicWeights {
            lines_cleared: 1.0,
            aggregate_height: 1.0,
            holes: 1.0,
            bumpiness: 1.0,
            mutation_rate: 0.0,
        };
        let eval = PositionEvaluation {
            valid: true,
            lines_cleared: 2,
            total_height: 10,
            hole_count: 3,
            bumpiness: 4,
        };
        assert_eq!(weights.score_position(&eval), 32.0 + 10.0 + 3.0 + 4.0);
    }

    #[test]
    fn test_weights_serialization_round_trip() {
        let weights = HeuristicWeights {
            lines_cleared: 0.5,
            aggregate_height: -0.25,
            holes: -1.0,
            bumpiness: 0.125,
            mutation_rate: 0.75,
        };
        let json = serde_json::to_string(&weights).unwrap();
        let back: HeuristicWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }
}

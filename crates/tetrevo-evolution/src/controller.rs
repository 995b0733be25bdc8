use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tetrevo_agent::{Agent, HeuristicWeights};
use tetrevo_engine::{Game, GameConfig, RngSeed, StepError};
use tetrevo_stats::DescriptiveStats;

use crate::record::AllTimeRecord;

/// Configuration for one evolution run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionConfig {
    /// Number of parallel (agent, game) slots. Selection keeps
    /// `population_size / 2` survivors, which must be at least two.
    pub population_size: usize,
    pub game: GameConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 16,
            game: GameConfig::default(),
        }
    }
}

/// Degenerate configuration detected at controller construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    /// Selection would leave fewer than two survivors, so reproduction has
    /// nothing to sample mates from.
    #[display("population of {size} leaves fewer than two survivors after selection")]
    PopulationTooSmall { size: usize },
}

/// One population slot: an agent and the game instance it plays, owned
/// exclusively by their index. Agents never reach into another slot.
#[derive(Debug, Clone)]
pub struct Instance {
    agent: Agent,
    game: Game,
}

impl Instance {
    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }
}

/// Result of one lockstep tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// At least one game is still live.
    Running,
    /// Every game has topped out; the round is complete and
    /// [`EvolutionController::next_generation`] may run.
    AllTerminal,
}

/// Report returned at the end of a round.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Index of the generation that just finished (starting at 0).
    pub generation: u32,
    pub champion_weights: HeuristicWeights,
    pub champion_score: f64,
    pub champion_lines: u32,
    /// Score distribution across the whole population.
    pub score_stats: DescriptiveStats,
}

/// Drives N parallel game instances through rounds of play, selection, and
/// reproduction.
///
/// All randomness flows from the seed handed to [`EvolutionController::new`]:
/// it initializes the agents, seeds every game's shape bag, and drives the
/// reproduction draws, so a run is reproducible bit for bit.
#[derive(Debug, Clone)]
pub struct EvolutionController {
    instances: Vec<Instance>,
    rng: Pcg32,
    generation: u32,
    best_index: usize,
    record: Option<AllTimeRecord>,
}

impl EvolutionController {
    /// Builds the initial population.
    ///
    /// Fails with [`EvolutionError::PopulationTooSmall`] when selection could
    /// not keep two survivors; the system does not attempt partial operation.
    pub fn new(config: EvolutionConfig, seed: RngSeed) -> Result<Self, EvolutionError> {
        if config.population_size / 2 < 2 {
            return Err(EvolutionError::PopulationTooSmall {
                size: config.population_size,
            });
        }
        let mut rng = Pcg32::from_seed(seed.bytes());
        let instances = (0..config.population_size)
            .map(|_| {
                let agent = Agent::random(&mut rng);
                let game = Game::with_seed(config.game, rng.random());
                Instance { agent, game }
            })
            .collect();
        Ok(Self {
            instances,
            rng,
            generation: 0,
            best_index: 0,
            record: None,
        })
    }

    #[must_use]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Index of the completed generations.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Slot with the highest score among the games still running.
    #[must_use]
    pub fn best_index(&self) -> usize {
        self.best_index
    }

    #[must_use]
    pub fn record(&self) -> Option<&AllTimeRecord> {
        self.record.as_ref()
    }

    /// Advances every instance by one lockstep frame.
    ///
    /// Each live agent computes and executes one best-move cycle, then every
    /// game receives one synchronized gravity step.
    pub fn tick(&mut self) -> Result<TickOutcome, StepError> {
        for instance in &mut self.instances {
            if instance.game.is_game_over() {
                continue;
            }
            instance.agent.play_turn(&mut instance.game)?;
        }
        for instance in &mut self.instances {
            instance.game.step_down()?;
        }
        self.best_index = self.find_best_index();
        if self.instances.iter().all(|i| i.game.is_game_over()) {
            Ok(TickOutcome::AllTerminal)
        } else {
            Ok(TickOutcome::Running)
        }
    }

    /// Performs selection and reproduction after a completed round.
    ///
    /// Slots are ranked by final score; the top half survives. The champion
    /// moves unchanged into slot 0 and every other slot receives a crossover
    /// child of the champion and a survivor drawn uniformly from the rest.
    /// Every game is then reset for the next round.
    pub fn next_generation(&mut self) -> GenerationSummary {
        let mut ranked: Vec<usize> = (0..self.instances.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.instances[b]
                .game
                .score()
                .total_cmp(&self.instances[a].game.score())
        });
        let survivor_count = self.instances.len() / 2;
        ranked.truncate(survivor_count);

        let champion = &self.instances[ranked[0]];
        let champion_weights = *champion.agent.weights();
        let champion_score = champion.game.score();
        let champion_lines = champion.game.lines();
        if self.record.is_none_or(|r| champion_score > r.score) {
            self.record = Some(AllTimeRecord {
                weights: champion_weights,
                score: champion_score,
                lines: champion_lines,
                generation: self.generation,
            });
        }

        let score_stats =
            DescriptiveStats::new(self.instances.iter().map(|i| i.game.score()))
                .expect("population is never empty");
        let summary = GenerationSummary {
            generation: self.generation,
            champion_weights,
            champion_score,
            champion_lines,
            score_stats,
        };

        let survivors: Vec<Agent> = ranked
            .iter()
            .map(|&i| self.instances[i].agent.clone())
            .collect();
        for (slot, instance) in self.instances.iter_mut().enumerate() {
            instance.game.reset();
            instance.agent = if slot == 0 {
                survivors[0].clone()
            } else {
                let mate = self.rng.random_range(1..survivor_count);
                survivors[0].crossover(&survivors[mate], &mut self.rng)
            };
        }
        self.generation += 1;
        self.best_index = 0;

        summary
    }

    /// Runs ticks until the round completes, then reseeds.
    ///
    /// Returns `Ok(None)` when the tick budget runs out first; the round
    /// stays in progress and can be continued with further calls.
    pub fn run_generation(
        &mut self,
        max_ticks: usize,
    ) -> Result<Option<GenerationSummary>, StepError> {
        for _ in 0..max_ticks {
            if self.tick()?.is_all_terminal() {
                return Ok(Some(self.next_generation()));
            }
        }
        Ok(None)
    }

    fn find_best_index(&self) -> usize {
        let mut best = 0;
        let mut best_score = 0.0;
        for (index, instance) in self.instances.iter().enumerate() {
            if instance.game.is_game_over() {
                continue;
            }
            let score = instance.game.score();
            if score > best_score {
                best_score = score;
                best = index;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EvolutionConfig {
        // Four rows leave no room to recover from the overhangs the S and Z
        // pieces force, so every agent tops out quickly and rounds stay cheap.
        EvolutionConfig {
            population_size: 4,
            game: GameConfig {
                rows: 4,
                ..GameConfig::default()
            },
        }
    }

    #[test]
    fn test_degenerate_population_is_rejected() {
        for size in [0, 1, 2, 3] {
            let config = EvolutionConfig {
                population_size: size,
                ..EvolutionConfig::default()
            };
            assert_eq!(
                EvolutionController::new(config, RngSeed::new([1; 16])).unwrap_err(),
                EvolutionError::PopulationTooSmall { size }
            );
        }
    }

    #[test]
    fn test_population_of_four_is_accepted() {
        let controller = EvolutionController::new(small_config(), RngSeed::new([1; 16])).unwrap();
        assert_eq!(controller.instances().len(), 4);
        assert_eq!(controller.generation(), 0);
        assert!(controller.record().is_none());
    }

    #[test]
    fn test_round_runs_to_completion_and_reseeds() {
        let mut controller =
            EvolutionController::new(small_config(), RngSeed::new([2; 16])).unwrap();
        let summary = controller
            .run_generation(1_000_000)
            .unwrap()
            .expect("a 4-row round finishes well inside the budget");

        assert_eq!(summary.generation, 0);
        assert_eq!(controller.generation(), 1);
        assert!(summary.champion_score >= summary.score_stats.median);
        assert_eq!(summary.score_stats.max, summary.champion_score);

        let record = controller.record().expect("first round always sets a record");
        assert_eq!(record.score, summary.champion_score);
        assert_eq!(record.generation, 0);

        // Every slot is live again on an empty board.
        for instance in controller.instances() {
            assert!(!instance.game().is_game_over());
            assert_eq!(instance.game().score(), 0.0);
            assert!(instance.game().board().col_heights().iter().all(|&h| h == 0));
        }
    }

    #[test]
    fn test_champion_survives_into_slot_zero() {
        let mut controller =
            EvolutionController::new(small_config(), RngSeed::new([3; 16])).unwrap();
        let summary = controller.run_generation(1_000_000).unwrap().unwrap();
        assert_eq!(
            controller.instances()[0].agent().weights(),
            &summary.champion_weights
        );
    }

    #[test]
    fn test_record_only_improves() {
        let mut controller =
            EvolutionController::new(small_config(), RngSeed::new([4; 16])).unwrap();
        let mut best = f64::NEG_INFINITY;
        for _ in 0..3 {
            controller.run_generation(1_000_000).unwrap().unwrap();
            let record = controller.record().unwrap();
            assert!(record.score >= best);
            best = record.score;
        }
        assert_eq!(controller.generation(), 3);
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let seed = RngSeed::new([5; 16]);
        let mut a = EvolutionController::new(small_config(), seed).unwrap();
        let mut b = EvolutionController::new(small_config(), seed).unwrap();
        let summary_a = a.run_generation(1_000_000).unwrap().unwrap();
        let summary_b = b.run_generation(1_000_000).unwrap().unwrap();
        assert_eq!(summary_a.champion_score, summary_b.champion_score);
        assert_eq!(summary_a.champion_weights, summary_b.champion_weights);
        assert_eq!(summary_a.score_stats, summary_b.score_stats);
    }

    #[test]
    fn test_tick_reports_running_before_terminal() {
        let mut controller =
            EvolutionController::new(small_config(), RngSeed::new([6; 16])).unwrap();
        assert_eq!(controller.tick().unwrap(), TickOutcome::Running);
    }

    #[test]
    fn test_budget_exhaustion_returns_none() {
        let mut controller =
            EvolutionController::new(small_config(), RngSeed::new([7; 16])).unwrap();
        assert!(controller.run_generation(1).unwrap().is_none());
    }
}

use serde::{Deserialize, Serialize};
use tetrevo_agent::HeuristicWeights;

/// Snapshot of the best agent observed across all generations.
///
/// Updated at round end whenever the generation champion beats the stored
/// score. The all-time record survives reseeding; the champion agent itself
/// does not (it keeps evolving).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllTimeRecord {
    pub weights: HeuristicWeights,
    pub score: f64,
    pub lines: u32,
    /// Generation in which the record was set.
    pub generation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_round_trip() {
        let record = AllTimeRecord {
            weights: HeuristicWeights {
                lines_cleared: 0.9,
                aggregate_height: -0.4,
                holes: -0.8,
                bumpiness: -0.1,
                mutation_rate: 0.2,
            },
            score: 125.5,
            lines: 14,
            generation: 3,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: AllTimeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

use crate::models::{DifficultyTier, Mode, Result, ScoreInterpretation};
use tracing::debug;

use super::{breakdown, classify, used_time, Breakdown, ScoringConstants};

/// Interprets raw scores against one set of scoring constants.
#[derive(Debug, Clone, Default)]
pub struct ScoringAlgorithm {
    constants: ScoringConstants,
}

impl ScoringAlgorithm {
    pub fn new(constants: ScoringConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &ScoringConstants {
        &self.constants
    }

    pub fn classify(&self, score: i64, mode: Mode) -> Option<DifficultyTier> {
        classify(&self.constants, score, mode)
    }

    pub fn used_time(&self, score: i64, tier: DifficultyTier, raid_id: i64) -> Result<f64> {
        used_time(&self.constants, score, tier, raid_id)
    }

    pub fn breakdown(&self, mode: Mode, score: i64) -> Option<Breakdown> {
        breakdown::solve(&self.constants, mode, score)
    }

    /// Classifies a score for the given boss and, when a tier matched,
    /// recovers its clear time.
    pub fn interpret(&self, score: i64, raid_id: i64) -> ScoreInterpretation {
        let mode = Mode::for_raid(raid_id);
        let tier = self.classify(score, mode);

        let used_time = tier.and_then(|tier| match self.used_time(score, tier, raid_id) {
            Ok(seconds) => Some(seconds),
            Err(e) => {
                debug!("No used time for score {} on raid {}: {}", score, raid_id, e);
                None
            }
        });

        ScoreInterpretation {
            score,
            mode,
            tier,
            used_time,
        }
    }
}

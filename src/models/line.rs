use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

use super::{DifficultyTier, Mode, RaidKind, RankScore, SeasonLabel};
use crate::scoring::{format_used_time, Breakdown};

/// What a single score says about the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInterpretation {
    pub score: i64,
    pub mode: Mode,
    pub tier: Option<DifficultyTier>,
    /// Seconds used out of the 3600 second budget; `None` when the score
    /// cannot be inverted for the classified tier.
    pub used_time: Option<f64>,
}

impl ScoreInterpretation {
    pub fn tier_label(&self) -> &'static str {
        DifficultyTier::label(self.tier)
    }

    pub fn formatted_time(&self) -> Option<String> {
        self.used_time.map(format_used_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankLineEntry {
    pub rank: u32,
    pub score: RankScore,
    pub interpretation: Option<ScoreInterpretation>,
    /// Elimination totals only: the nearest three-run decomposition.
    pub breakdown: Option<Breakdown>,
}

impl fmt::Display for RankLineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.rank, self.score)?;

        if let Some(interpretation) = &self.interpretation {
            write!(f, " ({})", interpretation.tier_label())?;
            match interpretation.formatted_time() {
                Some(time) => write!(f, " used {}", time)?,
                None if interpretation.tier.is_some() => f.write_str(" used time unavailable")?,
                None => {}
            }
        }

        if let Some(breakdown) = &self.breakdown {
            write!(f, " [{}]", breakdown)?;
        }

        Ok(())
    }
}

/// Score cut-offs of one season at the watched ranks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankLineReport {
    pub kind: RaidKind,
    pub season: SeasonLabel,
    pub raid_id: i64,
    pub boss_name: String,
    pub terrain: String,
    pub entries: Vec<RankLineEntry>,
    pub generated_at: DateTime<Utc>,
}

impl RankLineReport {
    pub fn title(&self) -> String {
        format!(
            "S{} - {} {} ({})",
            self.season, self.terrain, self.boss_name, self.kind
        )
    }
}

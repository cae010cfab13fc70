use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{RaidScoreError, Result};

/// Rank brackets that usage statistics are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankBand {
    Top1000,
    To5000,
    To10000,
    To20000,
}

impl RankBand {
    pub fn for_rank(rank: u32) -> Result<Self> {
        match rank {
            1..=1000 => Ok(RankBand::Top1000),
            1001..=5000 => Ok(RankBand::To5000),
            5001..=10000 => Ok(RankBand::To10000),
            10001..=20000 => Ok(RankBand::To20000),
            _ => Err(RaidScoreError::UnsupportedRank(rank)),
        }
    }

    pub fn bounds(&self) -> (u32, u32) {
        match self {
            RankBand::Top1000 => (1, 1000),
            RankBand::To5000 => (1001, 5000),
            RankBand::To10000 => (5001, 10000),
            RankBand::To20000 => (10001, 20000),
        }
    }

    /// Key of the band in usage payloads, which are keyed by the upper bound.
    pub fn usage_key(&self) -> String {
        self.bounds().1.to_string()
    }
}

impl fmt::Display for RankBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.bounds();
        write!(f, "ranks {}~{}", low, high)
    }
}

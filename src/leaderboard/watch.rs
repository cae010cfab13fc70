use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How close, in ranks, a player may drift towards their target before the
/// watch fires.
pub const WATCH_MARGIN: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchRejection {
    #[error("Current rank {current} is already below target {target}")]
    AlreadyBelowTarget { current: u32, target: u32 },

    #[error("Current rank {current} is within {margin} of target {target}")]
    TooClose { current: u32, target: u32, margin: u32 },
}

/// A player asking to be warned before falling past `target_rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWatch {
    pub account_id: u64,
    pub target_rank: u32,
    pub notified: bool,
}

impl RankWatch {
    /// Registers a watch, refusing targets the player is already past or
    /// already close to.
    pub fn register(account_id: u64, current_rank: u32, target_rank: u32) -> Result<Self, WatchRejection> {
        if current_rank > target_rank {
            return Err(WatchRejection::AlreadyBelowTarget {
                current: current_rank,
                target: target_rank,
            });
        }

        if target_rank - current_rank <= WATCH_MARGIN {
            return Err(WatchRejection::TooClose {
                current: current_rank,
                target: target_rank,
                margin: WATCH_MARGIN,
            });
        }

        Ok(Self {
            account_id,
            target_rank,
            notified: false,
        })
    }

    /// True once the player sits between the target and `WATCH_MARGIN`
    /// ranks past it. Fires only once.
    pub fn should_notify(&self, current_rank: u32) -> bool {
        if self.notified || current_rank <= self.target_rank {
            return false;
        }
        current_rank - self.target_rank <= WATCH_MARGIN
    }

    pub fn mark_notified(&mut self) {
        self.notified = true;
    }
}

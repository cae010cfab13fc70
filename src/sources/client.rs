use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    models::{LeaderboardPayload, RaidInfo, RaidKind, Result, SeasonLabel},
    usage::{StudentRoster, UsagePayload},
};

/// Supplier of the raw statistics payloads.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> String;

    /// Leaderboard snapshot of one season
    async fn fetch_leaderboard(&self, kind: RaidKind, season: &SeasonLabel) -> Result<LeaderboardPayload>;

    /// Boss roster and season calendars of every region
    async fn fetch_raid_info(&self) -> Result<RaidInfo>;

    /// Character usage of one season
    async fn fetch_usage(&self, kind: RaidKind, season: &SeasonLabel) -> Result<UsagePayload>;

    /// Student id -> name roster
    async fn fetch_students(&self) -> Result<StudentRoster>;
}

use crate::models::{LeaderboardPayload, RankScore, ScoreRecord};

/// Ranks shown on a default rank line.
pub const DEFAULT_WATCHED_RANKS: [u32; 6] = [1, 1000, 5000, 10000, 20000, 120000];

/// Projects a sparse leaderboard onto the watched ranks, in the order given.
/// Ranks missing from the payload come back as [`RankScore::NoData`].
pub fn extract(payload: &LeaderboardPayload, watched_ranks: &[u32]) -> Vec<ScoreRecord> {
    watched_ranks
        .iter()
        .map(|&rank| ScoreRecord {
            rank,
            score: payload
                .score_at(rank)
                .map_or(RankScore::NoData, RankScore::Score),
        })
        .collect()
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Leaderboard snapshot; `b` holds a sparse rank -> score table keyed by
/// the rank as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardPayload {
    #[serde(rename = "b", default)]
    pub ranks: HashMap<String, i64>,
}

impl LeaderboardPayload {
    pub fn score_at(&self, rank: u32) -> Option<i64> {
        self.ranks.get(&rank.to_string()).copied()
    }
}

/// Score at a watched rank. Zero is a real score, so absence has its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankScore {
    Score(i64),
    NoData,
}

impl RankScore {
    pub fn value(&self) -> Option<i64> {
        match self {
            RankScore::Score(score) => Some(*score),
            RankScore::NoData => None,
        }
    }
}

impl fmt::Display for RankScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankScore::Score(score) => f.write_str(&format_score(*score)),
            RankScore::NoData => f.write_str("no data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub rank: u32,
    pub score: RankScore,
}

/// Formats a score with comma thousands separators.
pub fn format_score(score: i64) -> String {
    let digits = score.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if score < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(44_025_000), "44,025,000");
        assert_eq!(format_score(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_payload_parses_rank_table() {
        let payload: LeaderboardPayload =
            serde_json::from_str(r#"{"a": 3, "b": {"1": 45000000, "1000": 0}}"#).unwrap();
        assert_eq!(payload.score_at(1), Some(45_000_000));
        assert_eq!(payload.score_at(1000), Some(0));
        assert_eq!(payload.score_at(5000), None);
    }

    #[test]
    fn test_rank_score_display() {
        assert_eq!(RankScore::Score(1_918_000).to_string(), "1,918,000");
        assert_eq!(RankScore::NoData.to_string(), "no data");
    }
}

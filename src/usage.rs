//! Character usage statistics across several seasons.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::leaderboard::RankBand;

/// Per-season usage payload: battle type -> rank range -> student id -> counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsagePayload {
    #[serde(rename = "characterUsage", default)]
    pub character_usage: HashMap<String, BattleUsage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleUsage {
    #[serde(rename = "r", default)]
    pub by_rank: HashMap<String, HashMap<String, Vec<u64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEntry {
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// Student id -> student metadata.
pub type StudentRoster = HashMap<String, StudentEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUsage {
    pub name: String,
    pub count: u64,
}

fn display_name(roster: &StudentRoster, student_id: &str) -> String {
    roster
        .get(student_id)
        .map(|entry| entry.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("unknown ({})", student_id))
}

/// Sums usage per student over every payload and battle type, optionally
/// restricted to one rank band. Most used first, ties by name.
pub fn aggregate_usage<'a>(
    payloads: impl IntoIterator<Item = &'a UsagePayload>,
    roster: &StudentRoster,
    band: Option<RankBand>,
) -> Vec<StudentUsage> {
    let band_key = band.map(|b| b.usage_key());
    let mut totals: HashMap<String, u64> = HashMap::new();

    for payload in payloads {
        for battle in payload.character_usage.values() {
            for (rank_range, students) in &battle.by_rank {
                if band_key.as_ref().map_or(false, |key| key != rank_range) {
                    continue;
                }
                for (student_id, counts) in students {
                    *totals.entry(display_name(roster, student_id)).or_insert(0) +=
                        counts.iter().sum::<u64>();
                }
            }
        }
    }

    let mut usage: Vec<StudentUsage> = totals
        .into_iter()
        .map(|(name, count)| StudentUsage { name, count })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> StudentRoster {
        serde_json::from_str(r#"{"10000": {"Name": "Aru"}, "10001": {"Name": "Eimi"}}"#).unwrap()
    }

    fn payload(json: &str) -> UsagePayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_aggregate_across_seasons_and_battles() {
        let first = payload(
            r#"{"characterUsage": {
                "raid_LightArmor": {"r": {"1000": {"10000": [1, 2], "10001": [5]}}},
                "raid_HeavyArmor": {"r": {"5000": {"10000": [3]}}}
            }}"#,
        );
        let second = payload(r#"{"characterUsage": {"all": {"r": {"1000": {"20000": [4]}}}}}"#);

        let usage = aggregate_usage([&first, &second], &roster(), None);
        assert_eq!(
            usage,
            vec![
                StudentUsage { name: "Aru".to_string(), count: 6 },
                StudentUsage { name: "Eimi".to_string(), count: 5 },
                StudentUsage { name: "unknown (20000)".to_string(), count: 4 },
            ]
        );
    }

    #[test]
    fn test_aggregate_single_band() {
        let data = payload(
            r#"{"characterUsage": {"all": {"r": {
                "1000": {"10000": [1]},
                "5000": {"10000": [7], "10001": [2]}
            }}}}"#,
        );

        let usage = aggregate_usage([&data], &roster(), Some(RankBand::To5000));
        assert_eq!(usage[0], StudentUsage { name: "Aru".to_string(), count: 7 });
        assert_eq!(usage[1].count, 2);
    }

    #[test]
    fn test_aggregate_nothing() {
        assert!(aggregate_usage(std::iter::empty(), &roster(), None).is_empty());
    }
}

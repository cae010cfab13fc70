use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{DifficultyTier, Mode, TIER_COUNT};

use super::ScoringConstants;

/// Number of clears that add up to an elimination raid total.
pub const RUNS_PER_TOTAL: u8 = 3;

/// Nearest decomposition of a total into tier clears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Clears per tier, indexed by [`DifficultyTier::index`].
    pub runs: [u8; TIER_COUNT],
    /// Sum of the chosen band endpoints.
    pub estimate: i64,
    /// `|estimate - score|`.
    pub difference: i64,
}

impl Breakdown {
    pub fn runs_at(&self, tier: DifficultyTier) -> u8 {
        self.runs[tier.index()]
    }

    pub fn total_runs(&self) -> u8 {
        self.runs.iter().sum()
    }
}

impl fmt::Display for Breakdown {
    /// Highest tier first, e.g. `1Tor+2Ins`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = DifficultyTier::DESCENDING
            .iter()
            .filter(|tier| self.runs_at(**tier) > 0)
            .map(|tier| format!("{}{}", self.runs_at(*tier), tier.abbreviation()))
            .collect();

        f.write_str(&terms.join("+"))
    }
}

fn max_runs(tier: DifficultyTier) -> u8 {
    match tier {
        DifficultyTier::Lunatic => 1,
        _ => RUNS_PER_TOTAL,
    }
}

/// Every run-count tuple summing to [`RUNS_PER_TOTAL`], enumerated with the
/// highest tier as the outermost counter and counts ascending.
fn run_tuples() -> Vec<[u8; TIER_COUNT]> {
    let mut tuples = Vec::new();
    let mut current = [0u8; TIER_COUNT];
    fill_runs(&mut tuples, &mut current, 0, RUNS_PER_TOTAL);
    tuples
}

fn fill_runs(
    tuples: &mut Vec<[u8; TIER_COUNT]>,
    current: &mut [u8; TIER_COUNT],
    position: usize,
    remaining: u8,
) {
    let Some(tier) = DifficultyTier::DESCENDING.get(position).copied() else {
        if remaining == 0 {
            tuples.push(*current);
        }
        return;
    };

    for runs in 0..=max_runs(tier).min(remaining) {
        current[tier.index()] = runs;
        fill_runs(tuples, current, position + 1, remaining - runs);
    }
    current[tier.index()] = 0;
}

/// Searches every run tuple against every min/max endpoint choice and keeps
/// the combination closest to `score`. Ties keep the first one found.
pub fn solve(constants: &ScoringConstants, mode: Mode, score: i64) -> Option<Breakdown> {
    let ranges = constants.thresholds(mode);
    let mut best: Option<Breakdown> = None;

    for runs in run_tuples() {
        // bit i picks the max endpoint for DESCENDING[i]
        for mask in 0u32..(1 << TIER_COUNT) {
            let estimate: i64 = DifficultyTier::DESCENDING
                .iter()
                .enumerate()
                .map(|(bit, tier)| {
                    let range = ranges[tier.index()];
                    let value = if mask & (1 << bit) != 0 { range.max } else { range.min };
                    i64::from(runs[tier.index()]) * value
                })
                .sum();
            let difference = i64::try_from(estimate.abs_diff(score)).unwrap_or(i64::MAX);

            if best.as_ref().map_or(true, |b| difference < b.difference) {
                best = Some(Breakdown { runs, estimate, difference });
            }
        }
    }

    best
}

/// Human readable decomposition, empty when none exists.
pub fn breakdown(constants: &ScoringConstants, mode: Mode, score: i64) -> String {
    solve(constants, mode, score)
        .map(|b| b.to_string())
        .unwrap_or_default()
}

pub mod constants;
pub mod classifier;
pub mod time;
pub mod breakdown;
pub mod algorithm;
pub mod calculator;

pub use constants::{ScoreRange, ScoringConstants, RAID_TIME_LIMIT_SECONDS};
pub use classifier::classify;
pub use time::{format_used_time, used_time};
pub use breakdown::{breakdown, solve as solve_breakdown, Breakdown, RUNS_PER_TOTAL};
pub use algorithm::ScoringAlgorithm;
pub use calculator::RankLineCalculator;

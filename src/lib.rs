pub mod models;
pub mod config;
pub mod scoring;
pub mod seasons;
pub mod leaderboard;
pub mod sources;
pub mod usage;

pub use models::{DifficultyTier, Mode, BossGroup, RaidKind, RaidScoreError, Result};
pub use config::Settings;
pub use scoring::{RankLineCalculator, ScoringAlgorithm, ScoringConstants};

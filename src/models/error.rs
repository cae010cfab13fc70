use thiserror::Error;

use super::{BossGroup, DifficultyTier};

#[derive(Error, Debug)]
pub enum RaidScoreError {
    #[error("Score {score} is below the {tier} floor of {floor}")]
    ScoreTooLow { score: i64, tier: DifficultyTier, floor: i64 },

    #[error("No base HP score is known for {tier} in boss group {group}")]
    UnknownBaseScore { tier: DifficultyTier, group: BossGroup },

    #[error("Rank {0} is outside the supported bands")]
    UnsupportedRank(u32),

    #[error("Invalid difficulty tier: {0}")]
    InvalidTier(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Source {url} answered with status {status}")]
    SourceUnavailable { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing data: {0}")]
    MissingData(String),
}

pub type Result<T> = std::result::Result<T, RaidScoreError>;

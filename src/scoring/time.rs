use crate::models::{BossGroup, DifficultyTier, RaidScoreError, Result};

use super::{ScoringConstants, RAID_TIME_LIMIT_SECONDS};

/// Recovers the seconds a clear took from its score.
///
/// A clear scores the tier's base difficulty score plus the boss's base HP
/// score plus `multiplier` points for every second left on the clock, so
/// the remaining time falls out of whatever exceeds the fixed part.
///
/// The result is not clamped: a wrong tier guess may yield a value outside
/// `0..=3600`, which callers can surface as-is.
pub fn used_time(
    constants: &ScoringConstants,
    score: i64,
    tier: DifficultyTier,
    raid_id: i64,
) -> Result<f64> {
    let group = BossGroup::for_raid(raid_id);
    let base_hp = constants
        .base_hp_score(tier, group)
        .ok_or(RaidScoreError::UnknownBaseScore { tier, group })?;

    let floor = base_hp + constants.base_difficulty_score(tier);
    let time_score = match score.checked_sub(floor) {
        Some(time_score) if time_score >= 0 => time_score,
        _ => return Err(RaidScoreError::ScoreTooLow { score, tier, floor }),
    };

    let remaining = time_score as f64 / constants.multiplier(tier) as f64;
    Ok(RAID_TIME_LIMIT_SECONDS - remaining)
}

/// Formats seconds as `MM:SS.mmm`.
///
/// Milliseconds are rounded before splitting, so 59.9996 renders as
/// `01:00.000` rather than carrying a four digit millisecond field.
pub fn format_used_time(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total_millis = (seconds.abs() * 1000.0).round() as u64;

    let minutes = total_millis / 60_000;
    let secs = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;

    format!("{}{:02}:{:02}.{:03}", sign, minutes, secs, millis)
}

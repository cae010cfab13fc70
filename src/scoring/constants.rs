use serde::{Deserialize, Serialize};

use crate::models::{BossGroup, DifficultyTier, Mode, TIER_COUNT};

/// Length of a raid's time budget in seconds.
pub const RAID_TIME_LIMIT_SECONDS: f64 = 3600.0;

/// Inclusive score band of a single clear at some tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Per-tier base HP scores for both boss groups. Entries that have not been
/// observed in game yet are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseHpScores {
    pub group_a: [Option<i64>; TIER_COUNT],
    pub group_b: [Option<i64>; TIER_COUNT],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub four_minute: [ScoreRange; TIER_COUNT],
    pub three_minute: [ScoreRange; TIER_COUNT],
}

/// Scoring rules of the game. Every table is indexed by
/// [`DifficultyTier::index`], easiest tier first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConstants {
    /// Score units awarded per second of remaining time.
    pub multiplier: [i64; TIER_COUNT],
    pub base_difficulty_score: [i64; TIER_COUNT],
    pub base_hp_score: BaseHpScores,
    pub thresholds: ThresholdTable,
}

impl Default for ScoringConstants {
    fn default() -> Self {
        Self {
            multiplier: [120, 240, 480, 960, 1_440, 1_920, 2_400, 2_880],
            base_difficulty_score: [
                250_000,
                500_000,
                1_000_000,
                2_000_000,
                4_000_000,
                6_800_000,
                12_200_000,
                17_710_000,
            ],
            base_hp_score: BaseHpScores {
                group_a: [
                    Some(260_000),
                    Some(520_000),
                    Some(1_040_000),
                    Some(2_080_000),
                    Some(4_160_000),
                    Some(7_280_000),
                    Some(14_560_000),
                    None, // not yet observed
                ],
                group_b: [
                    Some(277_000),
                    Some(554_000),
                    Some(1_108_000),
                    Some(2_216_000),
                    Some(4_432_000),
                    Some(7_756_000),
                    Some(15_512_000),
                    Some(26_315_000),
                ],
            },
            thresholds: ThresholdTable {
                four_minute: [
                    ScoreRange::new(527_000, 959_000),
                    ScoreRange::new(1_054_000, 1_918_000),
                    ScoreRange::new(2_108_000, 3_836_000),
                    ScoreRange::new(4_216_000, 7_672_000),
                    ScoreRange::new(8_432_000, 13_616_000),
                    ScoreRange::new(14_556_000, 21_468_000),
                    ScoreRange::new(27_712_000, 36_352_000),
                    ScoreRange::new(44_025_000, 54_393_000),
                ],
                three_minute: [
                    ScoreRange::new(510_000, 942_000),
                    ScoreRange::new(1_020_000, 1_884_000),
                    ScoreRange::new(2_040_000, 3_768_000),
                    ScoreRange::new(4_080_000, 7_536_000),
                    ScoreRange::new(8_160_000, 13_344_000),
                    ScoreRange::new(14_080_000, 20_992_000),
                    ScoreRange::new(26_760_000, 35_400_000),
                    ScoreRange::new(41_950_000, 52_318_000),
                ],
            },
        }
    }
}

impl ScoringConstants {
    pub fn multiplier(&self, tier: DifficultyTier) -> i64 {
        self.multiplier[tier.index()]
    }

    pub fn base_difficulty_score(&self, tier: DifficultyTier) -> i64 {
        self.base_difficulty_score[tier.index()]
    }

    pub fn base_hp_score(&self, tier: DifficultyTier, group: BossGroup) -> Option<i64> {
        match group {
            BossGroup::A => self.base_hp_score.group_a[tier.index()],
            BossGroup::B => self.base_hp_score.group_b[tier.index()],
        }
    }

    pub fn thresholds(&self, mode: Mode) -> &[ScoreRange; TIER_COUNT] {
        match mode {
            Mode::FourMinute => &self.thresholds.four_minute,
            Mode::ThreeMinute => &self.thresholds.three_minute,
        }
    }

    pub fn threshold_range(&self, mode: Mode, tier: DifficultyTier) -> ScoreRange {
        self.thresholds(mode)[tier.index()]
    }

    /// Checks that every table grows strictly with the tier.
    pub fn validate(&self) -> Result<(), String> {
        if !strictly_increasing(self.multiplier.iter().copied()) {
            return Err("Multipliers must increase strictly with tier".to_string());
        }

        if !strictly_increasing(self.base_difficulty_score.iter().copied()) {
            return Err("Base difficulty scores must increase strictly with tier".to_string());
        }

        for (group, column) in [
            (BossGroup::A, &self.base_hp_score.group_a),
            (BossGroup::B, &self.base_hp_score.group_b),
        ] {
            if !strictly_increasing(column.iter().flatten().copied()) {
                return Err(format!(
                    "Base HP scores of group {} must increase strictly with tier",
                    group
                ));
            }
        }

        for mode in [Mode::FourMinute, Mode::ThreeMinute] {
            let ranges = self.thresholds(mode);
            if ranges.iter().any(|r| r.min > r.max) {
                return Err(format!("Threshold range with min above max in {}", mode));
            }
            if !strictly_increasing(ranges.iter().map(|r| r.min)) {
                return Err(format!("Thresholds for {} must increase strictly with tier", mode));
            }
        }

        Ok(())
    }
}

fn strictly_increasing(values: impl Iterator<Item = i64>) -> bool {
    let mut previous: Option<i64> = None;
    for value in values {
        if previous.map_or(false, |p| value <= p) {
            return false;
        }
        previous = Some(value);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants_are_valid() {
        assert_eq!(ScoringConstants::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_flat_multipliers() {
        let mut constants = ScoringConstants::default();
        constants.multiplier[3] = constants.multiplier[2];
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let mut constants = ScoringConstants::default();
        constants.thresholds.three_minute[7].min = 1;
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_lunatic_group_a_is_unknown() {
        let constants = ScoringConstants::default();
        assert_eq!(constants.base_hp_score(DifficultyTier::Lunatic, BossGroup::A), None);
        assert_eq!(
            constants.base_hp_score(DifficultyTier::Normal, BossGroup::B),
            Some(277_000)
        );
    }

    #[test]
    fn test_four_minute_ranges_follow_scoring_formula() {
        let constants = ScoringConstants::default();
        for tier in DifficultyTier::ASCENDING {
            let floor = constants.base_difficulty_score(tier)
                + constants.base_hp_score(tier, BossGroup::B).unwrap();
            let range = constants.threshold_range(Mode::FourMinute, tier);
            assert_eq!(range.min, floor);
            assert_eq!(range.max, floor + constants.multiplier(tier) * 3600);
        }
    }
}

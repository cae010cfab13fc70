use crate::models::{DifficultyTier, Mode};

use super::ScoringConstants;

/// Returns the highest tier whose lower threshold does not exceed `score`,
/// or `None` when the score is below NORMAL.
pub fn classify(constants: &ScoringConstants, score: i64, mode: Mode) -> Option<DifficultyTier> {
    let thresholds = constants.thresholds(mode);

    DifficultyTier::DESCENDING
        .iter()
        .copied()
        .find(|tier| thresholds[tier.index()].min <= score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive_lower_bounds() {
        let constants = ScoringConstants::default();
        for mode in [Mode::FourMinute, Mode::ThreeMinute] {
            for tier in DifficultyTier::ASCENDING {
                let min = constants.threshold_range(mode, tier).min;
                assert_eq!(classify(&constants, min, mode), Some(tier));
            }
        }
    }

    #[test]
    fn test_below_normal_is_unknown() {
        let constants = ScoringConstants::default();
        for mode in [Mode::FourMinute, Mode::ThreeMinute] {
            let normal = constants.threshold_range(mode, DifficultyTier::Normal).min;
            assert_eq!(classify(&constants, normal - 1, mode), None);
            assert_eq!(classify(&constants, 0, mode), None);
            assert_eq!(classify(&constants, -5, mode), None);
        }
    }

    #[test]
    fn test_four_minute_lunatic_boundary() {
        let constants = ScoringConstants::default();
        assert_eq!(
            classify(&constants, 44_025_000, Mode::FourMinute),
            Some(DifficultyTier::Lunatic)
        );
        assert_eq!(
            classify(&constants, 44_024_999, Mode::FourMinute),
            Some(DifficultyTier::Torment)
        );
        assert_eq!(classify(&constants, 0, Mode::FourMinute), None);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let constants = ScoringConstants::default();
        for mode in [Mode::FourMinute, Mode::ThreeMinute] {
            let mut previous = None;
            for score in (0..60_000_000i64).step_by(9_973) {
                let tier = classify(&constants, score, mode);
                assert!(tier >= previous, "tier dropped at score {}", score);
                previous = tier;
            }
        }
    }
}

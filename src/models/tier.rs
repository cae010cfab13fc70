use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RaidScoreError;

/// Label shown for scores that fall below the lowest tier.
pub const UNKNOWN_TIER_LABEL: &str = "???";

pub const TIER_COUNT: usize = 8;

/// Raid difficulty, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DifficultyTier {
    Normal,
    Hard,
    VeryHard,
    Hardcore,
    Extreme,
    Insane,
    Torment,
    Lunatic,
}

impl DifficultyTier {
    pub const ASCENDING: [DifficultyTier; TIER_COUNT] = [
        DifficultyTier::Normal,
        DifficultyTier::Hard,
        DifficultyTier::VeryHard,
        DifficultyTier::Hardcore,
        DifficultyTier::Extreme,
        DifficultyTier::Insane,
        DifficultyTier::Torment,
        DifficultyTier::Lunatic,
    ];

    pub const DESCENDING: [DifficultyTier; TIER_COUNT] = [
        DifficultyTier::Lunatic,
        DifficultyTier::Torment,
        DifficultyTier::Insane,
        DifficultyTier::Extreme,
        DifficultyTier::Hardcore,
        DifficultyTier::VeryHard,
        DifficultyTier::Hard,
        DifficultyTier::Normal,
    ];

    /// Position in ascending order, used to index per-tier tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Normal => "NORMAL",
            DifficultyTier::Hard => "HARD",
            DifficultyTier::VeryHard => "VERYHARD",
            DifficultyTier::Hardcore => "HARDCORE",
            DifficultyTier::Extreme => "EXTREME",
            DifficultyTier::Insane => "INSANE",
            DifficultyTier::Torment => "TORMENT",
            DifficultyTier::Lunatic => "LUNATIC",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            DifficultyTier::Normal => "N",
            DifficultyTier::Hard => "H",
            DifficultyTier::VeryHard => "VH",
            DifficultyTier::Hardcore => "HC",
            DifficultyTier::Extreme => "Ext",
            DifficultyTier::Insane => "Ins",
            DifficultyTier::Torment => "Tor",
            DifficultyTier::Lunatic => "Lu",
        }
    }

    /// Renders a classification result, `???` when no tier matched.
    pub fn label(tier: Option<DifficultyTier>) -> &'static str {
        tier.map(|t| t.as_str()).unwrap_or(UNKNOWN_TIER_LABEL)
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = RaidScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_uppercase();

        DifficultyTier::ASCENDING
            .iter()
            .copied()
            .find(|tier| tier.as_str() == normalized)
            .ok_or_else(|| RaidScoreError::InvalidTier(s.to_string()))
    }
}

/// Battle duration class of a boss, selecting the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "4min")]
    FourMinute,
    #[serde(rename = "3min")]
    ThreeMinute,
}

impl Mode {
    /// Bosses 1 and 5 are fought on the three minute clock.
    pub fn for_raid(raid_id: i64) -> Self {
        if BossGroup::for_raid(raid_id) == BossGroup::A {
            Mode::ThreeMinute
        } else {
            Mode::FourMinute
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::FourMinute => "4min",
            Mode::ThreeMinute => "3min",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = RaidScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "4min" | "4" | "four" => Ok(Mode::FourMinute),
            "3min" | "3" | "three" => Ok(Mode::ThreeMinute),
            _ => Err(RaidScoreError::InvalidMode(s.to_string())),
        }
    }
}

/// Selects which base HP score column applies to a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossGroup {
    A,
    B,
}

impl BossGroup {
    pub const GROUP_A_RAIDS: [i64; 2] = [1, 5];

    pub fn for_raid(raid_id: i64) -> Self {
        if Self::GROUP_A_RAIDS.contains(&raid_id) {
            BossGroup::A
        } else {
            BossGroup::B
        }
    }
}

impl fmt::Display for BossGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BossGroup::A => f.write_str("A"),
            BossGroup::B => f.write_str("B"),
        }
    }
}

/// Total war raids and elimination raids keep separate season calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidKind {
    Raid,
    Eliminate,
}

impl RaidKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidKind::Raid => "raid",
            RaidKind::Eliminate => "eraid",
        }
    }
}

impl fmt::Display for RaidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

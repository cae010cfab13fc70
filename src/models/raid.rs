use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Raid metadata payload: a boss roster plus per-region season calendars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RaidInfo {
    #[serde(default)]
    pub raid: Vec<RaidDefinition>,
    #[serde(default)]
    pub raid_seasons: Vec<RegionSeasons>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RaidDefinition {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionSeasons {
    #[serde(default)]
    pub seasons: Vec<SeasonEntry>,
    #[serde(default)]
    pub eliminate_seasons: Vec<SeasonEntry>,
}

/// One season of a region calendar. Malformed fields decode to `None`
/// instead of failing the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeasonEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub season_display: Option<SeasonLabel>,
    #[serde(default, deserialize_with = "lenient")]
    pub raid_id: Option<i64>,
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub armor_types: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Lenient<T> {
    Value(T),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts the value itself or its string form; anything else is `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    let raw = Option::<Lenient<T>>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Lenient::Value(value) => Some(value),
        Lenient::Text(text) => text.trim().parse().ok(),
        Lenient::Other(_) => None,
    }))
}

impl SeasonEntry {
    /// Whether `self` and `other` describe the same raid.
    ///
    /// Armor types use containment, not equality: every armor type of
    /// `self` must appear in `other`. An entry without armor types is
    /// contained in anything.
    pub fn is_same_raid(&self, other: &SeasonEntry) -> bool {
        if self.raid_id.is_none() || self.raid_id != other.raid_id || self.terrain != other.terrain {
            return false;
        }

        match &self.armor_types {
            None => true,
            Some(ours) => {
                let theirs = other.armor_types.as_deref().unwrap_or(&[]);
                ours.iter().all(|armor| theirs.contains(armor))
            }
        }
    }

    /// A season is concluded once its end timestamp is not in the future.
    pub fn has_ended(&self, now_unix: f64) -> bool {
        self.end.map_or(true, |end| end <= now_unix)
    }
}

/// Season display value, numeric for most seasons but sometimes a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonLabel {
    Number(i64),
    Text(String),
}

impl SeasonLabel {
    pub fn matches(&self, query: &str) -> bool {
        self.to_string().trim().to_lowercase() == query.trim().to_lowercase()
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonLabel::Number(n) => write!(f, "{}", n),
            SeasonLabel::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for SeasonLabel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(SeasonLabel::Number)
            .unwrap_or_else(|_| SeasonLabel::Text(s.to_string())))
    }
}

impl From<i64> for SeasonLabel {
    fn from(n: i64) -> Self {
        SeasonLabel::Number(n)
    }
}

/// One reconciled season: which raid the reference region ran under a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedSeason {
    pub raid_id: i64,
    pub name: String,
    pub terrain: String,
}

/// Season label -> raid mapping with unique keys and stable insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonMapping {
    entries: Vec<(SeasonLabel, MappedSeason)>,
}

impl SeasonMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces; a replaced key keeps its original position.
    pub fn insert(&mut self, label: SeasonLabel, season: MappedSeason) {
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some((_, existing)) => *existing = season,
            None => self.entries.push((label, season)),
        }
    }

    pub fn get(&self, label: &SeasonLabel) -> Option<&MappedSeason> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, season)| season)
    }

    pub fn contains(&self, label: &SeasonLabel) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SeasonLabel, &MappedSeason)> {
        self.entries.iter().map(|(label, season)| (label, season))
    }

    pub fn labels(&self) -> impl Iterator<Item = &SeasonLabel> {
        self.entries.iter().map(|(label, _)| label)
    }
}

use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::leaderboard::DEFAULT_WATCHED_RANKS;
use crate::models::RaidKind;

/// Placeholder replaced by the season number in URL templates.
pub const SEASON_PLACEHOLDER: &str = "<id>";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub sources: SourceSettings,
    pub leaderboard: LeaderboardSettings,
    pub regions: RegionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub raid_url: String,
    pub eraid_url: String,
    pub raid_usage_url: String,
    pub eraid_usage_url: String,
    pub raid_info_url: String,
    pub student_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl SourceSettings {
    pub fn leaderboard_url(&self, kind: RaidKind, season: &str) -> String {
        let template = match kind {
            RaidKind::Raid => &self.raid_url,
            RaidKind::Eliminate => &self.eraid_url,
        };
        template.replace(SEASON_PLACEHOLDER, season)
    }

    pub fn usage_url(&self, kind: RaidKind, season: &str) -> String {
        let template = match kind {
            RaidKind::Raid => &self.raid_usage_url,
            RaidKind::Eliminate => &self.eraid_usage_url,
        };
        template.replace(SEASON_PLACEHOLDER, season)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub watched_ranks: Vec<u32>,
}

/// Indices into the raid info's per-region season blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSettings {
    /// Region whose calendar runs ahead
    pub reference: usize,
    /// Region being mapped onto the reference calendar
    pub source: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Raid Scorer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            sources: SourceSettings {
                raid_url: "https://blue.triple-lab.com/raid/<id>".to_string(),
                eraid_url: "https://blue.triple-lab.com/eraid/<id>".to_string(),
                raid_usage_url: "https://media.arona.ai/data/v3/raid/<id>/total".to_string(),
                eraid_usage_url: "https://media.arona.ai/data/v3/eraid/<id>/total".to_string(),
                raid_info_url: "https://schaledb.com/data/tw/raids.json".to_string(),
                student_url: "https://schaledb.com/data/tw/students.json".to_string(),
                timeout_seconds: 10,
                max_retries: 3,
            },
            leaderboard: LeaderboardSettings {
                watched_ranks: DEFAULT_WATCHED_RANKS.to_vec(),
            },
            regions: RegionSettings {
                reference: 0,
                source: 1,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RAID_SCORER").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.leaderboard.watched_ranks.is_empty() {
            return Err("At least one watched rank is required".to_string());
        }

        if self.leaderboard.watched_ranks.contains(&0) {
            return Err("Watched ranks start at 1".to_string());
        }

        if self.regions.reference == self.regions.source {
            return Err("Reference and source regions must differ".to_string());
        }

        let templates = [
            ("raid_url", &self.sources.raid_url),
            ("eraid_url", &self.sources.eraid_url),
            ("raid_usage_url", &self.sources.raid_usage_url),
            ("eraid_usage_url", &self.sources.eraid_usage_url),
        ];
        for (field, template) in templates {
            if !template.contains(SEASON_PLACEHOLDER) {
                return Err(format!("sources.{} must contain {}", field, SEASON_PLACEHOLDER));
            }
        }

        if self.sources.timeout_seconds == 0 {
            return Err("Source timeout must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut settings = Settings::default();
        settings.leaderboard.watched_ranks.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.regions.source = settings.regions.reference;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.sources.eraid_url = "https://example.com/eraid".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_url_templates() {
        let sources = Settings::default().sources;
        assert_eq!(
            sources.leaderboard_url(RaidKind::Raid, "74"),
            "https://blue.triple-lab.com/raid/74"
        );
        assert_eq!(
            sources.usage_url(RaidKind::Eliminate, "12"),
            "https://media.arona.ai/data/v3/eraid/12/total"
        );
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("raid_scorer_settings_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[leaderboard]\nwatched_ranks = [1, 500, 2500, 7500, 15000, 50000]\n\n[regions]\nreference = 2\nsource = 0\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        let settings = settings.unwrap();

        assert_eq!(settings.leaderboard.watched_ranks, vec![1, 500, 2500, 7500, 15000, 50000]);
        assert_eq!(settings.regions.reference, 2);
        assert_eq!(settings.regions.source, 0);
        // untouched sections keep their defaults
        assert_eq!(settings.sources.timeout_seconds, 10);
        assert_eq!(settings.validate(), Ok(()));
    }
}

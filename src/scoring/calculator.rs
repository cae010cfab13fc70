use crate::{
    config::Settings,
    leaderboard::{extract, RankBand},
    models::{
        Mode, RaidKind, RaidScoreError, RankLineEntry, RankLineReport, Result, SeasonLabel,
        SeasonMapping,
    },
    scoring::ScoringAlgorithm,
    seasons::{find_season, raid_name, reconcile, UNKNOWN_RAID_NAME},
    sources::StatsSource,
    usage::{aggregate_usage, StudentUsage},
};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Drives fetching, season resolution and score interpretation.
pub struct RankLineCalculator {
    source: Arc<dyn StatsSource>,
    algorithm: ScoringAlgorithm,
    settings: Settings,
}

impl RankLineCalculator {
    pub fn new(source: Arc<dyn StatsSource>, algorithm: ScoringAlgorithm, settings: Settings) -> Self {
        Self {
            source,
            algorithm,
            settings,
        }
    }

    /// Score cut-offs of a season at the configured ranks.
    pub async fn rank_line(&self, kind: RaidKind, season: i64) -> Result<RankLineReport> {
        let label = SeasonLabel::Number(season);
        info!("Building {} rank line for season {} via {}", kind, label, self.source.name());

        let leaderboard = self.source.fetch_leaderboard(kind, &label).await?;
        let raid_info = self.source.fetch_raid_info().await?;

        let season_entry = find_season(&raid_info, self.settings.regions.reference, kind, &label.to_string())
            .ok_or_else(|| RaidScoreError::MissingData(format!("no {} seasons in raid info", kind)))?;
        let raid_id = season_entry
            .raid_id
            .ok_or_else(|| RaidScoreError::MissingData(format!("{} season {} has no raid id", kind, label)))?;
        let boss_name = raid_name(&raid_info, raid_id)
            .unwrap_or(UNKNOWN_RAID_NAME)
            .to_string();

        let records = extract(&leaderboard, &self.settings.leaderboard.watched_ranks);
        let entries = records
            .into_iter()
            .map(|record| {
                // elimination scores total three clears, so only the breakdown applies
                let (interpretation, breakdown) = match (kind, record.score.value()) {
                    (_, None) => (None, None),
                    (RaidKind::Raid, Some(score)) => (Some(self.algorithm.interpret(score, raid_id)), None),
                    (RaidKind::Eliminate, Some(score)) => {
                        (None, self.algorithm.breakdown(Mode::for_raid(raid_id), score))
                    }
                };

                RankLineEntry {
                    rank: record.rank,
                    score: record.score,
                    interpretation,
                    breakdown,
                }
            })
            .collect();

        Ok(RankLineReport {
            kind,
            season: label,
            raid_id,
            boss_name,
            terrain: season_entry.terrain.clone(),
            entries,
            generated_at: Utc::now(),
        })
    }

    /// Reference-region seasons the source region has not reached yet. An
    /// unavailable raid info payload yields an empty mapping.
    pub async fn season_mapping(&self, kind: RaidKind) -> SeasonMapping {
        let raid_info = match self.source.fetch_raid_info().await {
            Ok(raid_info) => raid_info,
            Err(e) => {
                warn!("Raid info unavailable, no {} seasons mapped: {}", kind, e);
                return SeasonMapping::new();
            }
        };

        let mapping = reconcile(
            &raid_info,
            self.settings.regions.reference,
            self.settings.regions.source,
            kind,
            Utc::now(),
        );

        info!("{} season mapping holds {} season(s)", kind, mapping.len());
        mapping
    }

    /// Character usage summed over every mapped season. Seasons whose usage
    /// cannot be fetched are skipped.
    pub async fn character_usage(&self, kind: RaidKind, band: Option<RankBand>) -> Result<Vec<StudentUsage>> {
        let mapping = self.season_mapping(kind).await;
        if mapping.is_empty() {
            return Ok(Vec::new());
        }
        let roster = self.source.fetch_students().await?;

        let fetches = mapping.iter().map(|(label, season)| async move {
            info!("Fetching {} usage for S{} {} {}", kind, label, season.name, season.terrain);
            (label, self.source.fetch_usage(kind, label).await)
        });

        let mut payloads = Vec::new();
        for (label, result) in join_all(fetches).await {
            match result {
                Ok(payload) => payloads.push(payload),
                Err(e) => warn!("Skipping {} season {}: {}", kind, label, e),
            }
        }

        if payloads.is_empty() && !mapping.is_empty() {
            warn!("No {} usage could be fetched for any mapped season", kind);
        }

        Ok(aggregate_usage(&payloads, &roster, band))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DifficultyTier, LeaderboardPayload, RaidInfo, RankScore};
    use crate::sources::MockStatsSource;
    use crate::usage::UsagePayload;

    fn raid_info() -> RaidInfo {
        serde_json::from_str(
            r#"{
                "Raid": [
                    {"Id": 1, "Name": "Binah"},
                    {"Id": 2, "Name": "Chesed"},
                    {"Id": 3, "Name": "ShiroKuro"}
                ],
                "RaidSeasons": [
                    {
                        "Seasons": [
                            {"SeasonDisplay": 70, "RaidId": 2, "Terrain": "Indoor", "End": 1},
                            {"SeasonDisplay": 71, "RaidId": 3, "Terrain": "Street", "End": 2},
                            {"SeasonDisplay": 72, "RaidId": 1, "Terrain": "Outdoor", "End": 3}
                        ],
                        "EliminateSeasons": [
                            {"SeasonDisplay": 8, "RaidId": 2, "Terrain": "Indoor",
                             "ArmorTypes": ["LightArmor", "HeavyArmor", "Unarmed"], "End": 1}
                        ]
                    },
                    {
                        "Seasons": [
                            {"SeasonDisplay": 40, "RaidId": 3, "Terrain": "Indoor", "End": 1},
                            {"SeasonDisplay": 41, "RaidId": 2, "Terrain": "Indoor", "End": 2}
                        ],
                        "EliminateSeasons": []
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    fn leaderboard(json: &str) -> LeaderboardPayload {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_rank_line_interprets_watched_ranks() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source.expect_fetch_leaderboard().times(1).returning(|_, _| {
            // chesed (4 minute boss): torment floor + 600s left, and a normal clear
            Ok(leaderboard(r#"{"b": {"1": 29152000, "1000": 887000}}"#))
        });
        source.expect_fetch_raid_info().times(1).returning(|| Ok(raid_info()));

        let mut settings = Settings::default();
        settings.leaderboard.watched_ranks = vec![1, 1000, 5000];
        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), settings);

        let report = calculator.rank_line(RaidKind::Raid, 70).await.unwrap();
        assert_eq!(report.raid_id, 2);
        assert_eq!(report.boss_name, "Chesed");
        assert_eq!(report.terrain, "Indoor");
        assert_eq!(report.entries.len(), 3);

        let first = report.entries[0].interpretation.as_ref().unwrap();
        assert_eq!(first.tier, Some(DifficultyTier::Torment));
        assert_eq!(first.formatted_time().as_deref(), Some("50:00.000"));

        let second = report.entries[1].interpretation.as_ref().unwrap();
        assert_eq!(second.tier, Some(DifficultyTier::Normal));
        assert_eq!(second.formatted_time().as_deref(), Some("10:00.000"));

        assert_eq!(report.entries[2].score, RankScore::NoData);
        assert!(report.entries[2].interpretation.is_none());
        assert!(report.entries.iter().all(|e| e.breakdown.is_none()));
    }

    #[tokio::test]
    async fn test_eliminate_rank_line_adds_breakdown() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source
            .expect_fetch_leaderboard()
            .returning(|_, _| Ok(leaderboard(r#"{"b": {"1": 79288000}}"#)));
        source.expect_fetch_raid_info().returning(|| Ok(raid_info()));

        let mut settings = Settings::default();
        settings.leaderboard.watched_ranks = vec![1];
        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), settings);

        let report = calculator.rank_line(RaidKind::Eliminate, 8).await.unwrap();
        let entry = &report.entries[0];
        assert_eq!(entry.breakdown.as_ref().unwrap().to_string(), "1Tor+2Ins");

        // a three-clear total is never classified or time-inverted as one clear
        assert!(entry.interpretation.is_none());
        assert_eq!(entry.to_string(), "#1: 79,288,000 [1Tor+2Ins]");
    }

    #[tokio::test]
    async fn test_rank_line_propagates_fetch_errors() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source.expect_fetch_leaderboard().returning(|_, _| {
            Err(RaidScoreError::SourceUnavailable {
                url: "https://example.com/raid/70".to_string(),
                status: 503,
            })
        });
        source.expect_fetch_raid_info().never();

        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), Settings::default());
        let err = calculator.rank_line(RaidKind::Raid, 70).await.unwrap_err();
        assert!(matches!(err, RaidScoreError::SourceUnavailable { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_character_usage_skips_failed_seasons() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source.expect_fetch_raid_info().returning(|| Ok(raid_info()));
        source.expect_fetch_students().returning(|| {
            Ok(serde_json::from_str(r#"{"10000": {"Name": "Aru"}}"#).unwrap())
        });
        source.expect_fetch_usage().returning(|_, label| {
            if *label == SeasonLabel::Number(72) {
                Ok(serde_json::from_str::<UsagePayload>(
                    r#"{"characterUsage": {"all": {"r": {"1000": {"10000": [2, 3]}}}}}"#,
                )
                .unwrap())
            } else {
                Err(RaidScoreError::MissingData("no usage yet".to_string()))
            }
        });

        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), Settings::default());

        // source region concluded Chesed/Indoor, so seasons 72 and 71 are unmapped
        let mapping = calculator.season_mapping(RaidKind::Raid).await;
        assert_eq!(mapping.len(), 2);

        let usage = calculator.character_usage(RaidKind::Raid, None).await.unwrap();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].name, "Aru");
        assert_eq!(usage[0].count, 5);
    }

    #[tokio::test]
    async fn test_unavailable_raid_info_maps_nothing() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source.expect_fetch_raid_info().returning(|| {
            Err(RaidScoreError::MissingData("raid info did not decode".to_string()))
        });
        source.expect_fetch_students().never();
        source.expect_fetch_usage().never();

        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), Settings::default());

        assert!(calculator.season_mapping(RaidKind::Eliminate).await.is_empty());
        let usage = calculator.character_usage(RaidKind::Eliminate, None).await.unwrap();
        assert!(usage.is_empty());
    }

    #[tokio::test]
    async fn test_season_without_raid_id_is_skipped_in_mapping() {
        let mut source = MockStatsSource::new();
        source.expect_name().returning(|| "mock".to_string());
        source.expect_fetch_raid_info().returning(|| {
            Ok(serde_json::from_str(
                r#"{
                    "Raid": [{"Id": 1, "Name": "Binah"}, {"Id": 2, "Name": "Chesed"}],
                    "RaidSeasons": [
                        {"Seasons": [
                            {"SeasonDisplay": 70, "RaidId": 1, "Terrain": "Outdoor", "End": 1},
                            {"SeasonDisplay": 71, "Terrain": "Street", "End": 2},
                            {"SeasonDisplay": 72, "RaidId": 2, "Terrain": "Indoor", "End": "3"}
                        ]},
                        {"Seasons": [
                            {"SeasonDisplay": 40, "RaidId": 2, "Terrain": "Indoor", "End": 1},
                            {"SeasonDisplay": 41, "RaidId": 1, "Terrain": "Outdoor", "End": "2"}
                        ]}
                    ]
                }"#,
            )
            .unwrap())
        });

        let calculator = RankLineCalculator::new(Arc::new(source), ScoringAlgorithm::default(), Settings::default());

        let mapping = calculator.season_mapping(RaidKind::Raid).await;
        let labels: Vec<_> = mapping.labels().cloned().collect();
        assert_eq!(labels, vec![SeasonLabel::Number(72)]);
        assert_eq!(mapping.get(&SeasonLabel::Number(72)).unwrap().name, "Chesed");
    }
}

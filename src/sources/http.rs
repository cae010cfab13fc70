use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    config::SourceSettings,
    models::{LeaderboardPayload, RaidInfo, RaidKind, RaidScoreError, Result, SeasonLabel},
    sources::{retry_with_backoff, RetryConfig, StatsSource},
    usage::{StudentRoster, UsagePayload},
};

/// Fetches payloads from the public statistics and metadata endpoints.
pub struct HttpStatsSource {
    http_client: reqwest::Client,
    settings: SourceSettings,
    retry: RetryConfig,
}

impl HttpStatsSource {
    pub fn new(settings: SourceSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            retry: RetryConfig::with_attempts(settings.max_retries),
            settings,
        })
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RaidScoreError::SourceUnavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let payload = retry_with_backoff(&self.retry, url, || self.get_once(url)).await?;
        info!("Fetched {}", url);
        Ok(payload)
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    fn name(&self) -> String {
        "http".to_string()
    }

    async fn fetch_leaderboard(&self, kind: RaidKind, season: &SeasonLabel) -> Result<LeaderboardPayload> {
        let url = self.settings.leaderboard_url(kind, &season.to_string());
        self.get_json(&url).await
    }

    async fn fetch_raid_info(&self) -> Result<RaidInfo> {
        self.get_json(&self.settings.raid_info_url).await
    }

    async fn fetch_usage(&self, kind: RaidKind, season: &SeasonLabel) -> Result<UsagePayload> {
        let url = self.settings.usage_url(kind, &season.to_string());
        self.get_json(&url).await
    }

    async fn fetch_students(&self) -> Result<StudentRoster> {
        self.get_json(&self.settings.student_url).await
    }
}

// ── Fetcher seam ──
//
// The scheduler and service only need "give me the dataset for this
// language and mode". `QuestsClient` is the production implementation;
// tests substitute counting fakes.

use std::future::Future;

use questline_api::QuestsClient;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{GameMode, QuestData, Trader};

/// Source of quest datasets and trader lists.
pub trait QuestFetcher: Send + Sync + 'static {
    fn fetch_quests(
        &self,
        language: &str,
        game_mode: GameMode,
    ) -> impl Future<Output = Result<QuestData, CoreError>> + Send;

    fn fetch_traders(
        &self,
        language: &str,
        game_mode: GameMode,
    ) -> impl Future<Output = Result<Vec<Trader>, CoreError>> + Send;
}

impl QuestFetcher for QuestsClient {
    async fn fetch_quests(&self, language: &str, game_mode: GameMode) -> Result<QuestData, CoreError> {
        let mode = game_mode.to_string();
        let raw = QuestsClient::fetch_quests(self, language, &mode).await?;
        let data = QuestData::from(raw);
        debug!(language, %game_mode, tasks = data.tasks.len(), "quest dataset converted");
        Ok(data)
    }

    async fn fetch_traders(
        &self,
        language: &str,
        game_mode: GameMode,
    ) -> Result<Vec<Trader>, CoreError> {
        let mode = game_mode.to_string();
        let raw = QuestsClient::fetch_traders(self, language, &mode).await?;
        Ok(raw.into_iter().map(Trader::from).collect())
    }
}

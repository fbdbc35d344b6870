// ── QuestService facade ──
//
// Full lifecycle owner for quest data. Wires the store, the refresh
// scheduler, player settings, the trader list, and the memoized quest
// views together. Cheaply cloneable via `Arc<ServiceInner>`.

use std::sync::Arc;

use questline_api::{QuestsClient, TransportConfig};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::QuestsConfig;
use crate::error::CoreError;
use crate::fetcher::QuestFetcher;
use crate::memo::QuestViewCache;
use crate::model::{Achievement, GameMode, Prestige, QuestView, Settings, Trader};
use crate::scheduler::{
    AlwaysVisible, FetchKey, RefreshScheduler, RefreshSubscription, Visibility,
};
use crate::store::{FetchStatus, LoadingTracker, QuestState, QuestStateStream, QuestStore};

/// A read of one slice of quest data together with the fetch status.
#[derive(Debug, Clone)]
pub struct DataView<T> {
    pub data: T,
    pub status: FetchStatus,
    pub error: Option<Arc<CoreError>>,
}

impl<T> DataView<T> {
    fn project(state: &QuestState, data: T) -> Self {
        Self {
            data,
            status: state.status,
            error: state.error.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// Owns the quest cache and everything that reads or refreshes it.
pub struct QuestService<F: QuestFetcher = QuestsClient> {
    inner: Arc<ServiceInner<F>>,
}

impl<F: QuestFetcher> Clone for QuestService<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ServiceInner<F: QuestFetcher> {
    config: QuestsConfig,
    fetcher: Arc<F>,
    store: Arc<QuestStore>,
    loading: Arc<LoadingTracker>,
    scheduler: RefreshScheduler<F>,
    settings: watch::Sender<Arc<Settings>>,
    traders: watch::Sender<Arc<Vec<Trader>>>,
    views: QuestViewCache,
}

impl QuestService<QuestsClient> {
    /// Build a service backed by the HTTP client described by `config`.
    pub fn new(config: QuestsConfig) -> Result<Self, CoreError> {
        let mut transport = TransportConfig::default();
        if let Some(timeout) = config.timeout {
            transport = transport.with_timeout(timeout);
        }
        let client = QuestsClient::new(config.api_url.as_str(), &transport)?;
        Ok(Self::with_fetcher(Arc::new(client), config, Arc::new(AlwaysVisible)))
    }
}

impl<F: QuestFetcher> QuestService<F> {
    /// Build a service around any [`QuestFetcher`].
    pub fn with_fetcher(
        fetcher: Arc<F>,
        config: QuestsConfig,
        visibility: Arc<dyn Visibility>,
    ) -> Self {
        let loading = Arc::new(LoadingTracker::new());
        let store = Arc::new(QuestStore::with_indicator(loading.clone()));
        let scheduler = RefreshScheduler::with_options(
            Arc::clone(&fetcher),
            Arc::clone(&store),
            config.refresh_interval,
            visibility,
        );
        let (settings, _) = watch::channel(Arc::new(Settings::default()));
        let (traders, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            inner: Arc::new(ServiceInner {
                config,
                fetcher,
                store,
                loading,
                scheduler,
                settings,
                traders,
                views: QuestViewCache::new(),
            }),
        }
    }

    pub fn config(&self) -> &QuestsConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<QuestStore> {
        &self.inner.store
    }

    pub fn loading(&self) -> &LoadingTracker {
        &self.inner.loading
    }

    pub fn scheduler(&self) -> &RefreshScheduler<F> {
        &self.inner.scheduler
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Start (or join) the shared refresh cadence for this key.
    pub fn subscribe(&self, language: &str, game_mode: GameMode) -> RefreshSubscription<F> {
        self.inner
            .scheduler
            .subscribe(FetchKey::new(language, game_mode))
    }

    /// Fetch once and wait for the result, bypassing the scheduler.
    ///
    /// The outcome is recorded in the store exactly as a scheduled fetch
    /// would be; the error is also returned to the caller.
    pub async fn fetch_once(&self, language: &str, game_mode: GameMode) -> Result<(), CoreError> {
        let store = &self.inner.store;
        store.begin_fetch();
        match self.inner.fetcher.fetch_quests(language, game_mode).await {
            Ok(data) => {
                store.complete_fetch(Ok(data));
                Ok(())
            }
            Err(err) => {
                store.complete_fetch(Err(err.clone()));
                Err(err)
            }
        }
    }

    /// Fetch the trader list and install it.
    pub async fn refresh_traders(
        &self,
        language: &str,
        game_mode: GameMode,
    ) -> Result<(), CoreError> {
        let traders = self.inner.fetcher.fetch_traders(language, game_mode).await?;
        info!(count = traders.len(), "trader list loaded");
        self.set_traders(traders);
        Ok(())
    }

    // ── Inputs ───────────────────────────────────────────────────────

    pub fn set_settings(&self, settings: Settings) {
        debug!(game_mode = %settings.game_mode, "settings replaced");
        self.inner.settings.send_replace(Arc::new(settings));
    }

    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.inner.settings.borrow())
    }

    pub fn set_traders(&self, traders: Vec<Trader>) {
        self.inner.traders.send_replace(Arc::new(traders));
    }

    pub fn traders(&self) -> Arc<Vec<Trader>> {
        Arc::clone(&self.inner.traders.borrow())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn achievements(&self) -> DataView<Vec<Achievement>> {
        let state = self.inner.store.snapshot();
        DataView::project(&state, state.data.achievements.clone())
    }

    pub fn prestige(&self) -> DataView<Vec<Prestige>> {
        let state = self.inner.store.snapshot();
        DataView::project(&state, state.data.prestige.clone())
    }

    /// Quests annotated for the settings' current game mode. Recomputed
    /// only when the data, the trader list, or those settings change.
    pub fn quests(&self) -> DataView<Arc<Vec<QuestView>>> {
        let state = self.inner.store.snapshot();
        let traders = self.traders();
        let mode_settings = Arc::new(self.settings().current());
        let views = self
            .inner
            .views
            .get_or_derive(&state.data, &traders, &mode_settings);
        DataView::project(&state, views)
    }

    /// Store state changes, starting with the current state.
    pub fn state_stream(&self) -> QuestStateStream {
        self.inner.store.stream()
    }

    /// Stop background refreshes.
    pub fn shutdown(&self) {
        self.inner.scheduler.shutdown();
    }
}

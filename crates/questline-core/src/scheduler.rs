// ── Refresh scheduler ──
//
// Coordinates fetches for every consumer of the quest cache. Consumers
// share one "last fetched" key and one periodic timer: a key change
// triggers an immediate fetch and replaces the timer, a matching key is a
// no-op. The timer only fetches while the consuming surface is visible,
// and stops once the last subscription is dropped.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::config::DEFAULT_REFRESH_INTERVAL;
use crate::fetcher::QuestFetcher;
use crate::model::GameMode;
use crate::store::QuestStore;

// ── Fetch key ────────────────────────────────────────────────────────

/// The (language, game mode) pair a dataset is fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub language: String,
    pub game_mode: GameMode,
}

impl FetchKey {
    pub fn new(language: impl Into<String>, game_mode: GameMode) -> Self {
        Self {
            language: language.into(),
            game_mode,
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.game_mode)
    }
}

// ── Visibility ───────────────────────────────────────────────────────

/// Whether the consuming surface currently has focus. Timer ticks are
/// skipped while this returns `false`.
pub trait Visibility: Send + Sync {
    fn is_visible(&self) -> bool;
}

/// A surface that is always considered visible (headless consumers).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysVisible;

impl Visibility for AlwaysVisible {
    fn is_visible(&self) -> bool {
        true
    }
}

/// Visibility toggled from the outside (focus / blur events).
#[derive(Debug)]
pub struct VisibilityFlag {
    visible: AtomicBool,
}

impl VisibilityFlag {
    pub fn new(visible: bool) -> Self {
        Self {
            visible: AtomicBool::new(visible),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }
}

impl Default for VisibilityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Visibility for VisibilityFlag {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

// ── Scheduler ────────────────────────────────────────────────────────

#[derive(Default)]
struct SchedulerState {
    last_key: Option<FetchKey>,
    timer: Option<CancellationToken>,
    subscribers: usize,
}

impl SchedulerState {
    fn cancel_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}

struct SchedulerInner<F> {
    fetcher: Arc<F>,
    store: Arc<QuestStore>,
    visibility: Arc<dyn Visibility>,
    period: Duration,
    state: Mutex<SchedulerState>,
}

impl<F> SchedulerInner<F> {
    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        // The guarded state has no invariants a panicking holder could break.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared fetch cadence for one [`QuestStore`].
///
/// Cloning yields another handle to the same scheduler.
pub struct RefreshScheduler<F: QuestFetcher> {
    inner: Arc<SchedulerInner<F>>,
}

impl<F: QuestFetcher> Clone for RefreshScheduler<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: QuestFetcher> RefreshScheduler<F> {
    /// A scheduler with the default 10 minute period that always
    /// considers its consumer visible.
    pub fn new(fetcher: Arc<F>, store: Arc<QuestStore>) -> Self {
        Self::with_options(fetcher, store, DEFAULT_REFRESH_INTERVAL, Arc::new(AlwaysVisible))
    }

    /// A zero `period` disables periodic refresh; key changes still fetch.
    pub fn with_options(
        fetcher: Arc<F>,
        store: Arc<QuestStore>,
        period: Duration,
        visibility: Arc<dyn Visibility>,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                fetcher,
                store,
                visibility,
                period,
                state: Mutex::new(SchedulerState::default()),
            }),
        }
    }

    pub fn period(&self) -> Duration {
        self.inner.period
    }

    /// The key the most recent fetch was issued for.
    pub fn last_key(&self) -> Option<FetchKey> {
        self.inner.state().last_key.clone()
    }

    pub fn is_timer_running(&self) -> bool {
        self.inner.state().timer.is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state().subscribers
    }

    /// Register a consumer interested in `key`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe(&self, key: FetchKey) -> RefreshSubscription<F> {
        self.inner.state().subscribers += 1;
        self.sync(&key);
        RefreshSubscription {
            scheduler: self.clone(),
            key,
        }
    }

    /// Stop the timer regardless of how many subscriptions remain.
    pub fn shutdown(&self) {
        let mut state = self.inner.state();
        if state.timer.is_some() {
            info!("refresh scheduler shut down");
        }
        state.cancel_timer();
    }

    /// Fetch immediately if `key` differs from the last fetched key, then
    /// make sure a timer is running.
    fn sync(&self, key: &FetchKey) {
        let mut state = self.inner.state();

        if state.last_key.as_ref() != Some(key) {
            debug!(%key, "fetch key changed");
            state.last_key = Some(key.clone());
            state.cancel_timer();
            spawn_fetch(&self.inner, key.clone());
        }

        if self.inner.period.is_zero() {
            trace!("refresh period is zero; periodic refresh disabled");
        } else if state.timer.is_none() {
            let token = CancellationToken::new();
            let first_tick = Instant::now() + self.inner.period;
            tokio::spawn(refresh_task(
                Arc::clone(&self.inner),
                first_tick,
                token.clone(),
            ));
            state.timer = Some(token);
            info!(period = ?self.inner.period, "refresh timer started");
        }
    }

    fn unsubscribe(&self) {
        let mut state = self.inner.state();
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers == 0 && state.timer.is_some() {
            state.cancel_timer();
            info!("last subscriber left; refresh timer stopped");
        }
    }
}

// ── Subscription ─────────────────────────────────────────────────────

/// A live consumer of the quest cache. Dropping it unregisters the
/// consumer; the timer stops when no subscriptions remain.
pub struct RefreshSubscription<F: QuestFetcher> {
    scheduler: RefreshScheduler<F>,
    key: FetchKey,
}

impl<F: QuestFetcher> RefreshSubscription<F> {
    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    /// The consumer's language or game mode changed.
    pub fn update(&mut self, key: FetchKey) {
        self.scheduler.sync(&key);
        self.key = key;
    }
}

impl<F: QuestFetcher> Drop for RefreshSubscription<F> {
    fn drop(&mut self) {
        self.scheduler.unsubscribe();
    }
}

// ── Background tasks ─────────────────────────────────────────────────

fn spawn_fetch<F: QuestFetcher>(inner: &Arc<SchedulerInner<F>>, key: FetchKey) {
    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        inner.fetch(&key).await;
    });
}

impl<F: QuestFetcher> SchedulerInner<F> {
    /// One fetch cycle against the store. Errors end up in the store state;
    /// results for a key that was replaced while in flight are dropped.
    async fn fetch(&self, key: &FetchKey) {
        self.store.begin_fetch();
        let result = self.fetcher.fetch_quests(&key.language, key.game_mode).await;

        let current = self.state().last_key.as_ref() == Some(key);
        if !current {
            debug!(%key, "discarding result for superseded fetch key");
            return;
        }
        self.store.complete_fetch(result);
    }
}

async fn refresh_task<F: QuestFetcher>(
    inner: Arc<SchedulerInner<F>>,
    first_tick: Instant,
    cancel: CancellationToken,
) {
    let mut interval = interval_at(first_tick, inner.period);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if !inner.visibility.is_visible() {
                    trace!("refresh tick skipped; consumer not visible");
                    continue;
                }
                let key = inner.state().last_key.clone();
                if let Some(key) = key {
                    debug!(%key, "periodic refresh");
                    spawn_fetch(&inner, key);
                }
            }
        }
    }
}

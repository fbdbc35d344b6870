use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tokio_stream::Stream;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};

use super::loading::{DataCategory, LoadingIndicator, LoadingTracker};
use crate::error::CoreError;
use crate::model::QuestData;

/// Lifecycle of the most recent fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Point-in-time view of the store.
#[derive(Debug, Clone)]
pub struct QuestState {
    pub data: Arc<QuestData>,
    pub status: FetchStatus,
    /// Error from the last failed fetch. Cleared by the next success.
    pub error: Option<Arc<CoreError>>,
    pub last_success: Option<DateTime<Utc>>,
}

/// Cache of the last successfully fetched quest dataset.
///
/// Mutations are broadcast through a `watch` channel. The data `Arc` is
/// only swapped when a fetch returns content that differs from what is
/// cached, so downstream identity-keyed caches survive no-op refreshes.
pub struct QuestStore {
    state: watch::Sender<QuestState>,
    indicator: Arc<dyn LoadingIndicator>,
}

impl QuestStore {
    /// A store seeded with placeholder data and its own [`LoadingTracker`].
    pub fn new() -> Self {
        Self::with_indicator(Arc::new(LoadingTracker::new()))
    }

    pub fn with_indicator(indicator: Arc<dyn LoadingIndicator>) -> Self {
        let (state, _) = watch::channel(QuestState {
            data: Arc::new(QuestData::placeholder()),
            status: FetchStatus::Idle,
            error: None,
            last_success: None,
        });
        Self { state, indicator }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> QuestState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.borrow().status
    }

    pub fn data(&self) -> Arc<QuestData> {
        Arc::clone(&self.state.borrow().data)
    }

    pub fn subscribe(&self) -> watch::Receiver<QuestState> {
        self.state.subscribe()
    }

    /// Stream of states, starting with the current one.
    pub fn stream(&self) -> QuestStateStream {
        QuestStateStream {
            inner: WatchStream::new(self.state.subscribe()),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// A fetch was dispatched.
    pub fn begin_fetch(&self) {
        self.transition(|state| state.status = FetchStatus::Loading);
    }

    /// A fetch resolved.
    pub fn complete_fetch(&self, result: Result<QuestData, CoreError>) {
        match result {
            Ok(data) => self.transition(|state| {
                state.status = FetchStatus::Succeeded;
                state.error = None;
                state.last_success = Some(Utc::now());
                if *state.data == data {
                    debug!("fetched quest data unchanged");
                } else {
                    debug!(tasks = data.tasks.len(), "quest data replaced");
                    state.data = Arc::new(data);
                }
            }),
            Err(err) => {
                warn!(error = %err, transient = err.is_transient(), "quest fetch failed");
                self.transition(|state| {
                    state.status = FetchStatus::Failed;
                    state.error = Some(Arc::new(err));
                });
            }
        }
    }

    /// Apply `update`, then report the status change (if any).
    fn transition(&self, update: impl FnOnce(&mut QuestState)) {
        let mut previous = FetchStatus::Idle;
        let mut current = FetchStatus::Idle;
        self.state.send_modify(|state| {
            previous = state.status;
            update(state);
            current = state.status;
        });

        if previous != current {
            self.notify(current);
        }
    }

    fn notify(&self, status: FetchStatus) {
        for category in [DataCategory::Achievements, DataCategory::Quests] {
            match status {
                FetchStatus::Idle => {}
                FetchStatus::Loading => self.indicator.mark_loading(category),
                FetchStatus::Succeeded | FetchStatus::Failed => {
                    self.indicator.mark_loaded(category);
                }
            }
        }
    }
}

impl Default for QuestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `Stream` adapter over store state changes.
pub struct QuestStateStream {
    inner: WatchStream<QuestState>,
}

impl Stream for QuestStateStream {
    type Item = QuestState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::{Achievement, QuestData};

    #[derive(Default)]
    struct RecordingIndicator {
        calls: Mutex<Vec<String>>,
    }

    impl LoadingIndicator for RecordingIndicator {
        fn mark_loading(&self, category: DataCategory) {
            self.calls.lock().unwrap().push(format!("loading:{category}"));
        }

        fn mark_loaded(&self, category: DataCategory) {
            self.calls.lock().unwrap().push(format!("loaded:{category}"));
        }
    }

    fn dataset(name: &str) -> QuestData {
        QuestData {
            achievements: vec![Achievement {
                id: "a1".into(),
                name: name.into(),
                description: None,
                hidden: false,
                side: None,
                rarity: None,
                player_percentage: None,
                image_link: None,
            }],
            ..QuestData::placeholder()
        }
    }

    #[test]
    fn starts_idle_with_placeholder() {
        let store = QuestStore::new();
        let state = store.snapshot();
        assert_eq!(state.status, FetchStatus::Idle);
        assert!(state.error.is_none());
        assert_eq!(*state.data, QuestData::placeholder());
    }

    #[test]
    fn success_replaces_data_only_when_changed() {
        let store = QuestStore::new();

        store.begin_fetch();
        assert_eq!(store.status(), FetchStatus::Loading);
        store.complete_fetch(Ok(dataset("first")));
        let first = store.data();
        assert_eq!(store.status(), FetchStatus::Succeeded);

        store.begin_fetch();
        store.complete_fetch(Ok(dataset("first")));
        assert!(Arc::ptr_eq(&first, &store.data()));

        store.begin_fetch();
        store.complete_fetch(Ok(dataset("second")));
        assert!(!Arc::ptr_eq(&first, &store.data()));
        assert_eq!(store.data().achievements[0].name, "second");
    }

    #[test]
    fn failure_records_error_and_keeps_data() {
        let store = QuestStore::new();
        store.begin_fetch();
        store.complete_fetch(Ok(dataset("kept")));

        store.begin_fetch();
        store.complete_fetch(Err(CoreError::Timeout));

        let state = store.snapshot();
        assert_eq!(state.status, FetchStatus::Failed);
        assert!(matches!(state.error.as_deref(), Some(CoreError::Timeout)));
        assert_eq!(state.data.achievements[0].name, "kept");

        store.begin_fetch();
        store.complete_fetch(Ok(dataset("kept")));
        assert!(store.snapshot().error.is_none());
    }

    #[test]
    fn status_changes_notify_both_categories() {
        let indicator = Arc::new(RecordingIndicator::default());
        let store = QuestStore::with_indicator(indicator.clone());

        store.begin_fetch();
        store.complete_fetch(Err(CoreError::Timeout));

        let calls = indicator.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "loading:achievements",
                "loading:quests",
                "loaded:achievements",
                "loaded:quests",
            ]
        );
    }

    #[test]
    fn repeated_loading_does_not_renotify() {
        let indicator = Arc::new(RecordingIndicator::default());
        let store = QuestStore::with_indicator(indicator.clone());

        store.begin_fetch();
        store.begin_fetch();

        assert_eq!(indicator.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let store = QuestStore::new();
        let mut rx = store.subscribe();

        store.begin_fetch();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().status, FetchStatus::Loading);

        store.complete_fetch(Ok(dataset("x")));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().status, FetchStatus::Succeeded);
    }

    #[tokio::test]
    async fn stream_yields_current_state_first() {
        use tokio_stream::StreamExt;

        let store = QuestStore::new();
        let mut stream = store.stream();

        let first = stream.next().await.unwrap();
        assert_eq!(first.status, FetchStatus::Idle);

        store.begin_fetch();
        let next = stream.next().await.unwrap();
        assert_eq!(next.status, FetchStatus::Loading);
    }
}

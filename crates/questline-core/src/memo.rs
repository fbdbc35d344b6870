// ── Memoized quest views ──
//
// Caches the last derived view list keyed by its three inputs. Quest data
// and traders are compared by `Arc` identity (the store only swaps the
// data `Arc` when the content changed); settings are compared by value.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;

use crate::derive::derive_quest_views;
use crate::model::{ModeSettings, QuestData, QuestView, Trader};

struct Memo {
    data: Arc<QuestData>,
    traders: Arc<Vec<Trader>>,
    settings: Arc<ModeSettings>,
    views: Arc<Vec<QuestView>>,
}

impl Memo {
    fn matches(
        &self,
        data: &Arc<QuestData>,
        traders: &Arc<Vec<Trader>>,
        settings: &Arc<ModeSettings>,
    ) -> bool {
        Arc::ptr_eq(&self.data, data)
            && Arc::ptr_eq(&self.traders, traders)
            && (Arc::ptr_eq(&self.settings, settings) || *self.settings == **settings)
    }
}

/// Single-entry cache in front of [`derive_quest_views`].
///
/// Lock-free: concurrent misses may both compute, last store wins. Both
/// results are equal since derivation is pure.
#[derive(Default)]
pub struct QuestViewCache {
    entry: ArcSwapOption<Memo>,
}

impl QuestViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached views for these inputs, deriving them on a miss.
    pub fn get_or_derive(
        &self,
        data: &Arc<QuestData>,
        traders: &Arc<Vec<Trader>>,
        settings: &Arc<ModeSettings>,
    ) -> Arc<Vec<QuestView>> {
        if let Some(memo) = &*self.entry.load() {
            if memo.matches(data, traders, settings) {
                return Arc::clone(&memo.views);
            }
        }

        let views = Arc::new(derive_quest_views(&data.tasks, traders, settings));
        debug!(quests = views.len(), "derived quest views");

        self.entry.store(Some(Arc::new(Memo {
            data: Arc::clone(data),
            traders: Arc::clone(traders),
            settings: Arc::clone(settings),
            views: Arc::clone(&views),
        })));
        views
    }

    /// Drop the cached entry.
    pub fn invalidate(&self) {
        self.entry.store(None);
    }
}

use dashmap::DashMap;
use serde::Serialize;
use strum::Display;

/// Named data categories reported to the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataCategory {
    Achievements,
    Quests,
}

/// Receives loading transitions for named data categories.
pub trait LoadingIndicator: Send + Sync {
    fn mark_loading(&self, category: DataCategory);
    fn mark_loaded(&self, category: DataCategory);
}

/// Default [`LoadingIndicator`]: remembers which categories are loading.
#[derive(Debug, Default)]
pub struct LoadingTracker {
    loading: DashMap<DataCategory, bool>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self, category: DataCategory) -> bool {
        self.loading.get(&category).is_some_and(|entry| *entry)
    }
}

impl LoadingIndicator for LoadingTracker {
    fn mark_loading(&self, category: DataCategory) {
        self.loading.insert(category, true);
    }

    fn mark_loaded(&self, category: DataCategory) {
        self.loading.insert(category, false);
    }
}

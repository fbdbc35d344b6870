// questline-core: Quest cache, refresh scheduling, and activity derivation
// between questline-api and consumers (CLI).

pub mod config;
pub mod convert;
pub mod derive;
pub mod error;
pub mod fetcher;
pub mod memo;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_API_URL, DEFAULT_REFRESH_INTERVAL, QuestsConfig};
pub use derive::{derive_quest_views, is_quest_active};
pub use error::CoreError;
pub use fetcher::QuestFetcher;
pub use memo::QuestViewCache;
pub use scheduler::{
    AlwaysVisible, FetchKey, RefreshScheduler, RefreshSubscription, Visibility, VisibilityFlag,
};
pub use service::{DataView, QuestService};
pub use store::{
    DataCategory, FetchStatus, LoadingIndicator, LoadingTracker, QuestState, QuestStateStream,
    QuestStore,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Achievement, GameMode, ModeSettings, Objective, ObjectiveView, Prestige, Quest, QuestData,
    QuestView, Settings, Trader,
};

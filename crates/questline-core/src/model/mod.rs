// ── Domain model ──
//
// Canonical quest types consumed by the store, the deriver, and the views.
// Wire types from `questline-api` are converted into these in `convert`.

mod dataset;
mod quest;
mod settings;
mod view;

pub use dataset::{Achievement, Prestige, QuestData};
pub use quest::{
    GameMode, MapRef, Objective, Quest, QuestStatus, TaskRef, TaskRequirement, Trader, TraderRef,
    TraderRequirement,
};
pub use settings::{ModeSettings, NO_FACTION, Settings};
pub use view::{ObjectiveView, QuestView};

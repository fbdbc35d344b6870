// ── Quest cache store ──
//
// Holds the last fetched dataset with its fetch status and error, and
// reports loading transitions to a global loading indicator.

mod loading;
mod quest_store;

pub use loading::{DataCategory, LoadingIndicator, LoadingTracker};
pub use quest_store::{FetchStatus, QuestState, QuestStore, QuestStateStream};

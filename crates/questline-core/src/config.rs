// ── Runtime service configuration ──
//
// Describes where quest data comes from and how often it is refreshed.
// Never touches disk: `questline-config` builds one and hands it in.

use std::time::Duration;

use url::Url;

/// Default quest API base URL.
pub const DEFAULT_API_URL: &str = "https://api.tarkov.dev";

/// Default interval between background refreshes (10 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(600_000);

/// Configuration for a `QuestService`.
#[derive(Debug, Clone)]
pub struct QuestsConfig {
    /// Quest API base URL.
    pub api_url: Url,
    /// Per-request timeout. `None` lets a hung request stay pending.
    pub timeout: Option<Duration>,
    /// Period of the background refresh timer.
    pub refresh_interval: Duration,
}

impl Default for QuestsConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: None,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

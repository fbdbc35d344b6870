// ── Player progress settings ──
//
// Read-only inputs to the deriver. One `ModeSettings` per game mode;
// `Settings::game_mode` selects which one is current.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GameMode;

/// Faction value meaning "player has not picked a faction".
pub const NO_FACTION: &str = "NONE";

/// Per-game-mode progress and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeSettings {
    pub completed_quests: Vec<String>,
    pub failed_quests: Vec<String>,
    pub objectives_completed: Vec<String>,
    /// When disabled, every quest is reported active.
    pub use_tarkov_tracker: bool,
    pub player_level: u32,
    pub pmc_faction: String,
    /// Trader levels keyed by trader normalized name (`prapor = 2`).
    #[serde(flatten)]
    pub trader_levels: BTreeMap<String, f64>,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            completed_quests: Vec::new(),
            failed_quests: Vec::new(),
            objectives_completed: Vec::new(),
            use_tarkov_tracker: false,
            player_level: 1,
            pmc_faction: NO_FACTION.into(),
            trader_levels: BTreeMap::new(),
        }
    }
}

impl ModeSettings {
    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|id| id == quest_id)
    }

    pub fn is_failed(&self, quest_id: &str) -> bool {
        self.failed_quests.iter().any(|id| id == quest_id)
    }

    pub fn is_objective_completed(&self, objective_id: &str) -> bool {
        self.objectives_completed.iter().any(|id| id == objective_id)
    }

    pub fn trader_level(&self, normalized_name: &str) -> Option<f64> {
        self.trader_levels.get(normalized_name).copied()
    }
}

/// All per-mode settings plus the currently selected game mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub game_mode: GameMode,
    pub modes: BTreeMap<GameMode, ModeSettings>,
}

impl Settings {
    /// Settings for `mode`, or defaults if none were stored.
    pub fn for_mode(&self, mode: GameMode) -> ModeSettings {
        self.modes.get(&mode).cloned().unwrap_or_default()
    }

    /// Settings for the currently selected game mode.
    pub fn current(&self) -> ModeSettings {
        self.for_mode(self.game_mode)
    }
}

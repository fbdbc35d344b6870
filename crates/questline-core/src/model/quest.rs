use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// A distinct player-progress context with independent settings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    #[default]
    Regular,
    Pve,
}

/// A quest status a task requirement can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum QuestStatus {
    Complete,
    Failed,
    Active,
}

/// An in-game quest with its prerequisites and objectives.
///
/// Immutable once fetched; the whole list is replaced on each refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub normalized_name: Option<String>,
    pub trader: Option<TraderRef>,
    pub map: Option<MapRef>,
    pub experience: Option<i64>,
    pub wiki_link: Option<String>,
    pub min_player_level: Option<u32>,
    /// `None` only matches players without a faction.
    #[serde(default)]
    pub faction_name: Option<String>,
    #[serde(default)]
    pub kappa_required: bool,
    #[serde(default)]
    pub lightkeeper_required: bool,
    /// `None` entries are significant: see `derive::is_quest_active`.
    #[serde(default)]
    pub task_requirements: Vec<Option<TaskRequirement>>,
    #[serde(default)]
    pub trader_requirements: Vec<TraderRequirement>,
    #[serde(default)]
    pub objectives: Vec<Option<Objective>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A prerequisite on another quest's status. Satisfied when any of the
/// listed statuses holds for the referenced quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequirement {
    pub task: TaskRef,
    /// Raw status strings; unknown values are tolerated and skipped.
    pub status: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderRequirement {
    pub requirement_type: String,
    pub trader: TraderRef,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_method: Option<String>,
}

impl TraderRequirement {
    pub const LEVEL: &'static str = "level";

    pub fn is_level(&self) -> bool {
        self.requirement_type == Self::LEVEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_name: Option<String>,
}

/// A sub-step of a quest, independently markable complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maps: Vec<MapRef>,
    /// Type-specific fields carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A trader as known to the trader collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trader {
    pub id: String,
    pub name: String,
    /// Key under which per-mode settings store this trader's level.
    pub normalized_name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn game_mode_parses_case_insensitively() {
        assert_eq!("PVE".parse::<GameMode>().unwrap(), GameMode::Pve);
        assert_eq!("regular".parse::<GameMode>().unwrap(), GameMode::Regular);
        assert_eq!(GameMode::Pve.to_string(), "pve");
    }

    #[test]
    fn quest_status_rejects_unknown_values() {
        assert_eq!(
            "complete".parse::<QuestStatus>().unwrap(),
            QuestStatus::Complete
        );
        assert!("abandoned".parse::<QuestStatus>().is_err());
    }
}

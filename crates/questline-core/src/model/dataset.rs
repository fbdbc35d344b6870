use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Quest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub hidden: bool,
    pub side: Option<String>,
    pub rarity: Option<String>,
    pub player_percentage: Option<f64>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prestige {
    pub id: String,
    pub name: String,
    pub prestige_level: Option<u32>,
    pub image_link: Option<String>,
    pub conditions: Vec<Value>,
}

/// One fetched quest dataset. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    pub achievements: Vec<Achievement>,
    pub prestige: Vec<Prestige>,
    pub tasks: Vec<Arc<Quest>>,
}

impl QuestData {
    /// The dataset a fresh store starts with, before any fetch resolves.
    pub fn placeholder() -> Self {
        Self::default()
    }
}

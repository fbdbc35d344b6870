// Wire types for the quest GraphQL API.
//
// Field names mirror the API's camelCase schema. Lists the API may return
// as `null` are decoded as empty; individual `null` list entries are kept
// as `None` so callers can decide what a missing entry means.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decode a nullable list as an empty `Vec`.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── GraphQL envelope ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LangModeVariables<'a> {
    pub lang: &'a str,
    pub game_mode: &'a str,
}

// ── Quest dataset ────────────────────────────────────────────────────

/// The full quest dataset: achievements, prestige tiers, and tasks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QuestDataResponse {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub achievements: Vec<AchievementResponse>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub prestige: Vec<PrestigeResponse>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tasks: Vec<Option<TaskResponse>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default)]
    pub normalized_name: Option<String>,
    #[serde(default)]
    pub trader: Option<TraderRefResponse>,
    #[serde(default)]
    pub map: Option<MapRefResponse>,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(default)]
    pub wiki_link: Option<String>,
    #[serde(default)]
    pub min_player_level: Option<u32>,
    #[serde(default)]
    pub faction_name: Option<String>,
    #[serde(default)]
    pub kappa_required: Option<bool>,
    #[serde(default)]
    pub lightkeeper_required: Option<bool>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub task_requirements: Vec<Option<TaskRequirementResponse>>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub trader_requirements: Vec<Option<TraderRequirementResponse>>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub objectives: Vec<Option<ObjectiveResponse>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaskRefResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaskRequirementResponse {
    pub task: TaskRefResponse,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub status: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderRefResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub normalized_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderRequirementResponse {
    pub requirement_type: String,
    pub trader: TraderRefResponse,
    pub value: f64,
    #[serde(default)]
    pub compare_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRefResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub normalized_name: Option<String>,
}

/// A quest objective. Fields beyond the common ones are kept verbatim
/// in `extra` (objective shapes vary by objective type).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObjectiveResponse {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub maps: Vec<MapRefResponse>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub player_percentage: Option<f64>,
    #[serde(default)]
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prestige_level: Option<u32>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub conditions: Vec<Value>,
}

// ── Traders ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct TradersData {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub traders: Vec<TraderResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderResponse {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
    #[serde(default)]
    pub image_link: Option<String>,
}

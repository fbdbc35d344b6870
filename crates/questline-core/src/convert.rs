// ── API-to-domain type conversions ──
//
// Bridges raw `questline_api` wire types into canonical `crate::model`
// types. Null list entries are handled per field: task requirements and
// objectives keep them (the deriver gives them meaning), null tasks and
// trader requirements are dropped.

use std::sync::Arc;

use questline_api::types::{
    AchievementResponse, MapRefResponse, ObjectiveResponse, PrestigeResponse, QuestDataResponse,
    TaskRefResponse, TaskRequirementResponse, TaskResponse, TraderRefResponse,
    TraderRequirementResponse, TraderResponse,
};

use crate::model::{
    Achievement, MapRef, Objective, Prestige, Quest, QuestData, TaskRef, TaskRequirement, Trader,
    TraderRef, TraderRequirement,
};

impl From<QuestDataResponse> for QuestData {
    fn from(raw: QuestDataResponse) -> Self {
        Self {
            achievements: raw.achievements.into_iter().map(Achievement::from).collect(),
            prestige: raw.prestige.into_iter().map(Prestige::from).collect(),
            tasks: raw
                .tasks
                .into_iter()
                .flatten()
                .map(|t| Arc::new(Quest::from(t)))
                .collect(),
        }
    }
}

impl From<TaskResponse> for Quest {
    fn from(raw: TaskResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            normalized_name: raw.normalized_name,
            trader: raw.trader.map(TraderRef::from),
            map: raw.map.map(MapRef::from),
            experience: raw.experience,
            wiki_link: raw.wiki_link,
            min_player_level: raw.min_player_level,
            faction_name: raw.faction_name,
            kappa_required: raw.kappa_required.unwrap_or(false),
            lightkeeper_required: raw.lightkeeper_required.unwrap_or(false),
            task_requirements: raw
                .task_requirements
                .into_iter()
                .map(|req| req.map(TaskRequirement::from))
                .collect(),
            trader_requirements: raw
                .trader_requirements
                .into_iter()
                .flatten()
                .map(TraderRequirement::from)
                .collect(),
            objectives: raw
                .objectives
                .into_iter()
                .map(|obj| obj.map(Objective::from))
                .collect(),
        }
    }
}

impl From<TaskRefResponse> for TaskRef {
    fn from(raw: TaskRefResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

impl From<TaskRequirementResponse> for TaskRequirement {
    fn from(raw: TaskRequirementResponse) -> Self {
        Self {
            task: raw.task.into(),
            status: raw.status.into_iter().flatten().collect(),
        }
    }
}

impl From<TraderRefResponse> for TraderRef {
    fn from(raw: TraderRefResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            normalized_name: raw.normalized_name,
        }
    }
}

impl From<TraderRequirementResponse> for TraderRequirement {
    fn from(raw: TraderRequirementResponse) -> Self {
        Self {
            requirement_type: raw.requirement_type,
            trader: raw.trader.into(),
            value: raw.value,
            compare_method: raw.compare_method,
        }
    }
}

impl From<MapRefResponse> for MapRef {
    fn from(raw: MapRefResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            normalized_name: raw.normalized_name,
        }
    }
}

impl From<ObjectiveResponse> for Objective {
    fn from(raw: ObjectiveResponse) -> Self {
        Self {
            id: raw.id,
            kind: raw.kind,
            description: raw.description,
            optional: raw.optional.unwrap_or(false),
            maps: raw.maps.into_iter().map(MapRef::from).collect(),
            extra: raw.extra,
        }
    }
}

impl From<AchievementResponse> for Achievement {
    fn from(raw: AchievementResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            hidden: raw.hidden.unwrap_or(false),
            side: raw.side,
            rarity: raw.rarity,
            player_percentage: raw.player_percentage,
            image_link: raw.image_link,
        }
    }
}

impl From<PrestigeResponse> for Prestige {
    fn from(raw: PrestigeResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            prestige_level: raw.prestige_level,
            image_link: raw.image_link,
            conditions: raw.conditions,
        }
    }
}

impl From<TraderResponse> for Trader {
    fn from(raw: TraderResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            normalized_name: raw.normalized_name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_entries_follow_field_rules() {
        let raw: QuestDataResponse = serde_json::from_value(json!({
            "achievements": null,
            "prestige": [],
            "tasks": [
                null,
                {
                    "id": "t1",
                    "name": "Gunsmith",
                    "taskRequirements": [null],
                    "traderRequirements": [null, {
                        "requirementType": "level",
                        "trader": { "id": "mech" },
                        "value": 2
                    }],
                    "objectives": [null, { "id": "o1" }]
                }
            ]
        }))
        .unwrap();

        let data = QuestData::from(raw);

        assert!(data.achievements.is_empty());
        assert_eq!(data.tasks.len(), 1);

        let quest = &data.tasks[0];
        assert_eq!(quest.task_requirements, vec![None]);
        assert_eq!(quest.trader_requirements.len(), 1);
        assert!(quest.trader_requirements[0].is_level());
        assert_eq!(quest.objectives.len(), 2);
        assert!(quest.objectives[0].is_none());
        assert!(!quest.kappa_required);
    }

    #[test]
    fn null_faction_keeps_sibling_tasks() {
        let raw: QuestDataResponse = serde_json::from_value(json!({
            "tasks": [
                { "id": "t1", "name": "Debut", "factionName": "Any" },
                {
                    "id": "t2",
                    "name": "Checking",
                    "factionName": null,
                    "taskRequirements": [{ "task": { "id": "t1" }, "status": [null, "complete"] }]
                }
            ]
        }))
        .unwrap();

        let data = QuestData::from(raw);

        assert_eq!(data.tasks.len(), 2);
        assert_eq!(data.tasks[0].faction_name.as_deref(), Some("Any"));
        assert_eq!(data.tasks[1].faction_name, None);
        let requirement = data.tasks[1].task_requirements[0].as_ref().unwrap();
        assert_eq!(requirement.status, vec!["complete".to_owned()]);
    }
}

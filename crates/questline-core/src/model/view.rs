// ── Derived views ──
//
// Read-time annotations layered over fetched quests. Never stored back.

use std::sync::Arc;

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{Objective, Quest};

/// An objective annotated with its completion state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveView {
    #[serde(flatten)]
    pub objective: Objective,
    pub complete: bool,
}

/// A quest with annotated objectives and its derived `active` flag.
///
/// Serializes as the quest's own fields with `objectives` replaced by the
/// annotated list and `active` added.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestView {
    pub quest: Arc<Quest>,
    pub objectives: Vec<ObjectiveView>,
    pub active: bool,
}

impl QuestView {
    pub fn id(&self) -> &str {
        &self.quest.id
    }

    pub fn name(&self) -> &str {
        &self.quest.name
    }

    pub fn completed_objectives(&self) -> usize {
        self.objectives.iter().filter(|o| o.complete).count()
    }
}

impl Serialize for QuestView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Value::Object(fields) = serde_json::to_value(&*self.quest).map_err(S::Error::custom)?
        else {
            return Err(S::Error::custom("quest did not serialize to an object"));
        };

        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        for (key, value) in &fields {
            if key == "objectives" {
                map.serialize_entry(key, &self.objectives)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("active", &self.active)?;
        map.end()
    }
}

// ── Quest-activity derivation ──
//
// Pure computation of per-quest `active` flags and objective completion
// from the fetched quest list, the trader list, and the current mode's
// progress settings. No I/O, no hidden state.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::model::{
    ModeSettings, NO_FACTION, ObjectiveView, Quest, QuestStatus, QuestView, Trader,
};

/// Quest faction value meaning "available to every faction".
pub const ANY_FACTION: &str = "Any";

/// Derive a view for every quest, in input order.
pub fn derive_quest_views(
    quests: &[Arc<Quest>],
    traders: &[Trader],
    settings: &ModeSettings,
) -> Vec<QuestView> {
    let oracle = StatusOracle::new(quests, traders, settings);

    quests
        .iter()
        .map(|quest| QuestView {
            quest: Arc::clone(quest),
            objectives: annotate_objectives(quest, settings),
            active: oracle.active(&quest.id),
        })
        .collect()
}

/// Whether the quest with `id` is currently available to the player.
pub fn is_quest_active(
    id: &str,
    quests: &[Arc<Quest>],
    traders: &[Trader],
    settings: &ModeSettings,
) -> bool {
    StatusOracle::new(quests, traders, settings).active(id)
}

/// Drop `None` objectives and mark each remaining one complete or not.
fn annotate_objectives(quest: &Quest, settings: &ModeSettings) -> Vec<ObjectiveView> {
    quest
        .objectives
        .iter()
        .flatten()
        .map(|objective| ObjectiveView {
            complete: settings.is_objective_completed(&objective.id),
            objective: objective.clone(),
        })
        .collect()
}

// ── Status evaluation ────────────────────────────────────────────────

/// Answers `complete` / `failed` / `active` for any quest id.
struct StatusOracle<'a> {
    quests: HashMap<&'a str, &'a Quest>,
    traders: &'a [Trader],
    settings: &'a ModeSettings,
}

impl<'a> StatusOracle<'a> {
    fn new(quests: &'a [Arc<Quest>], traders: &'a [Trader], settings: &'a ModeSettings) -> Self {
        let mut by_id = HashMap::with_capacity(quests.len());
        for quest in quests {
            // First occurrence wins on duplicate ids.
            by_id.entry(quest.id.as_str()).or_insert(&**quest);
        }
        Self {
            quests: by_id,
            traders,
            settings,
        }
    }

    fn holds(&self, status: QuestStatus, id: &str, visiting: &mut Vec<String>) -> bool {
        match status {
            QuestStatus::Complete => self.settings.is_completed(id),
            QuestStatus::Failed => self.settings.is_failed(id),
            QuestStatus::Active => self.active_inner(id, visiting),
        }
    }

    fn active(&self, id: &str) -> bool {
        self.active_inner(id, &mut Vec::new())
    }

    fn active_inner(&self, id: &str, visiting: &mut Vec<String>) -> bool {
        if !self.settings.use_tarkov_tracker {
            return true;
        }
        if self.settings.is_completed(id) || self.settings.is_failed(id) {
            return false;
        }
        let Some(quest) = self.quests.get(id).copied() else {
            return false;
        };

        // An `active` requirement chain that loops back on itself.
        if visiting.iter().any(|v| v == id) {
            warn!(quest = id, "cyclic active-status requirement; treating as inactive");
            return false;
        }

        if let Some(min_level) = quest.min_player_level {
            if self.settings.player_level < min_level {
                // Not enforced.
                trace!(
                    quest = id,
                    player_level = self.settings.player_level,
                    min_level,
                    "player level below quest minimum"
                );
            }
        }

        if quest.faction_name.as_deref() != Some(ANY_FACTION)
            && self.settings.pmc_faction != NO_FACTION
            && quest.faction_name.as_deref() != Some(self.settings.pmc_faction.as_str())
        {
            return false;
        }

        visiting.push(id.to_owned());
        let requirements_met = self.task_requirements_met(quest, visiting);
        visiting.pop();
        if let Some(met) = requirements_met {
            return met;
        }

        self.check_trader_levels(quest);
        true
    }

    /// `Some(true)` when a null requirement short-circuits the quest to
    /// active, `Some(false)` when a requirement is unmet, `None` when every
    /// requirement is satisfied and evaluation should continue.
    fn task_requirements_met(&self, quest: &Quest, visiting: &mut Vec<String>) -> Option<bool> {
        for requirement in &quest.task_requirements {
            let Some(requirement) = requirement else {
                return Some(true);
            };

            let mut satisfied = false;
            for raw in &requirement.status {
                let Ok(status) = raw.parse::<QuestStatus>() else {
                    warn!(quest = %quest.id, status = %raw, "Unrecognized task status");
                    continue;
                };
                if self.holds(status, &requirement.task.id, visiting) {
                    satisfied = true;
                    break;
                }
            }

            if !satisfied {
                return Some(false);
            }
        }
        None
    }

    /// Compare stored trader levels against `level` requirements. Computed
    /// for diagnostics only; never changes the result.
    fn check_trader_levels(&self, quest: &Quest) {
        for requirement in quest.trader_requirements.iter().filter(|r| r.is_level()) {
            let Some(trader) = self.traders.iter().find(|t| t.id == requirement.trader.id) else {
                trace!(quest = %quest.id, trader = %requirement.trader.id, "trader not in trader list");
                continue;
            };
            let level = self.settings.trader_level(&trader.normalized_name);
            if level.is_none_or(|level| level < requirement.value) {
                trace!(
                    quest = %quest.id,
                    trader = %trader.normalized_name,
                    ?level,
                    required = requirement.value,
                    "trader level below requirement"
                );
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Objective, TaskRef, TaskRequirement, TraderRef, TraderRequirement};
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    // ── Fixtures ─────────────────────────────────────────────────────

    fn quest(id: &str) -> Quest {
        Quest {
            id: id.into(),
            name: format!("Quest {id}"),
            normalized_name: None,
            trader: None,
            map: None,
            experience: None,
            wiki_link: None,
            min_player_level: None,
            faction_name: Some(ANY_FACTION.into()),
            kappa_required: false,
            lightkeeper_required: false,
            task_requirements: Vec::new(),
            trader_requirements: Vec::new(),
            objectives: Vec::new(),
        }
    }

    fn requires(id: &str, statuses: &[&str]) -> Option<TaskRequirement> {
        Some(TaskRequirement {
            task: TaskRef {
                id: id.into(),
                name: None,
            },
            status: statuses.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    fn objective(id: &str) -> Objective {
        Objective {
            id: id.into(),
            kind: None,
            description: None,
            optional: false,
            maps: Vec::new(),
            extra: Map::new(),
        }
    }

    fn tracking() -> ModeSettings {
        ModeSettings {
            use_tarkov_tracker: true,
            ..ModeSettings::default()
        }
    }

    fn arcs(quests: Vec<Quest>) -> Vec<Arc<Quest>> {
        quests.into_iter().map(Arc::new).collect()
    }

    fn active_ids(views: &[QuestView]) -> Vec<&str> {
        views.iter().filter(|v| v.active).map(QuestView::id).collect()
    }

    // ── Tracker toggle ───────────────────────────────────────────────

    #[test]
    fn tracker_disabled_makes_everything_active() {
        let mut blocked = quest("b");
        blocked.faction_name = Some("BEAR".into());
        blocked.task_requirements = vec![requires("missing", &["complete"])];
        let quests = arcs(vec![quest("a"), blocked]);

        let settings = ModeSettings {
            use_tarkov_tracker: false,
            completed_quests: vec!["a".into()],
            pmc_faction: "USEC".into(),
            ..ModeSettings::default()
        };

        let views = derive_quest_views(&quests, &[], &settings);
        assert!(views.iter().all(|v| v.active));
    }

    // ── Completion and failure ───────────────────────────────────────

    #[test]
    fn completed_and_failed_quests_are_inactive() {
        let quests = arcs(vec![quest("done"), quest("lost"), quest("open")]);
        let settings = ModeSettings {
            completed_quests: vec!["done".into()],
            failed_quests: vec!["lost".into()],
            ..tracking()
        };

        let views = derive_quest_views(&quests, &[], &settings);
        assert_eq!(active_ids(&views), vec!["open"]);
    }

    #[test]
    fn unknown_quest_id_is_inactive() {
        let quests = arcs(vec![quest("a")]);
        assert!(!is_quest_active("ghost", &quests, &[], &tracking()));
        assert!(is_quest_active("ghost", &quests, &[], &ModeSettings::default()));
    }

    // ── Faction gating ───────────────────────────────────────────────

    #[test]
    fn faction_mismatch_is_inactive_unless_player_has_no_faction() {
        let mut pmc_only = quest("pmc");
        pmc_only.faction_name = Some("PMC".into());
        let quests = arcs(vec![pmc_only]);

        let scav = ModeSettings {
            pmc_faction: "Scav".into(),
            ..tracking()
        };
        assert!(!is_quest_active("pmc", &quests, &[], &scav));

        let unaffiliated = ModeSettings {
            pmc_faction: "NONE".into(),
            ..tracking()
        };
        assert!(is_quest_active("pmc", &quests, &[], &unaffiliated));

        let matching = ModeSettings {
            pmc_faction: "PMC".into(),
            ..tracking()
        };
        assert!(is_quest_active("pmc", &quests, &[], &matching));
    }

    #[test]
    fn missing_faction_is_gated_like_a_named_one() {
        let mut unnamed = quest("unnamed");
        unnamed.faction_name = None;
        let quests = arcs(vec![unnamed]);

        let usec = ModeSettings {
            pmc_faction: "USEC".into(),
            ..tracking()
        };
        assert!(!is_quest_active("unnamed", &quests, &[], &usec));

        let unaffiliated = ModeSettings {
            pmc_faction: NO_FACTION.into(),
            ..tracking()
        };
        assert!(is_quest_active("unnamed", &quests, &[], &unaffiliated));
    }

    #[test]
    fn any_faction_quest_ignores_player_faction() {
        let quests = arcs(vec![quest("open")]);
        let bear = ModeSettings {
            pmc_faction: "BEAR".into(),
            ..tracking()
        };
        assert!(is_quest_active("open", &quests, &[], &bear));
    }

    // ── Task requirements ────────────────────────────────────────────

    #[test]
    fn requirement_satisfied_by_any_listed_status() {
        let mut follow_up = quest("b");
        follow_up.task_requirements = vec![requires("a", &["complete", "failed"])];
        let quests = arcs(vec![quest("a"), follow_up]);

        let failed_a = ModeSettings {
            failed_quests: vec!["a".into()],
            ..tracking()
        };
        assert!(is_quest_active("b", &quests, &[], &failed_a));

        assert!(!is_quest_active("b", &quests, &[], &tracking()));
    }

    #[test]
    fn active_status_requirement_recurses() {
        let mut parallel = quest("b");
        parallel.task_requirements = vec![requires("a", &["active"])];
        let quests = arcs(vec![quest("a"), parallel]);

        assert!(is_quest_active("b", &quests, &[], &tracking()));

        let a_done = ModeSettings {
            completed_quests: vec!["a".into()],
            ..tracking()
        };
        assert!(!is_quest_active("b", &quests, &[], &a_done));
    }

    #[test]
    fn null_requirement_short_circuits_to_active() {
        let mut odd = quest("odd");
        odd.task_requirements = vec![
            requires("never", &["complete"]),
            None,
            requires("also-never", &["complete"]),
        ];
        let mut leading_null = quest("lead");
        leading_null.task_requirements = vec![None, requires("never", &["complete"])];
        let quests = arcs(vec![odd, leading_null]);

        // A failing requirement before the null still wins.
        assert!(!is_quest_active("odd", &quests, &[], &tracking()));
        assert!(is_quest_active("lead", &quests, &[], &tracking()));
    }

    #[test]
    fn unrecognized_statuses_are_skipped() {
        let mut q = quest("b");
        q.task_requirements = vec![requires("a", &["abandoned", "complete"])];
        let mut only_unknown = quest("c");
        only_unknown.task_requirements = vec![requires("a", &["abandoned"])];
        let quests = arcs(vec![quest("a"), q, only_unknown]);

        let a_done = ModeSettings {
            completed_quests: vec!["a".into()],
            ..tracking()
        };
        assert!(is_quest_active("b", &quests, &[], &a_done));
        assert!(!is_quest_active("c", &quests, &[], &a_done));
    }

    #[test]
    fn cyclic_active_requirements_terminate() {
        let mut a = quest("a");
        a.task_requirements = vec![requires("b", &["active"])];
        let mut b = quest("b");
        b.task_requirements = vec![requires("a", &["active"])];
        let quests = arcs(vec![a, b]);

        assert!(!is_quest_active("a", &quests, &[], &tracking()));
    }

    // ── Inert gates ──────────────────────────────────────────────────

    #[test]
    fn player_and_trader_levels_are_not_enforced() {
        let mut gated = quest("gated");
        gated.min_player_level = Some(40);
        gated.trader_requirements = vec![
            TraderRequirement {
                requirement_type: "level".into(),
                trader: TraderRef {
                    id: "prapor-id".into(),
                    name: None,
                    normalized_name: None,
                },
                value: 4.0,
                compare_method: None,
            },
            TraderRequirement {
                requirement_type: "level".into(),
                trader: TraderRef {
                    id: "unknown-trader".into(),
                    name: None,
                    normalized_name: None,
                },
                value: 4.0,
                compare_method: None,
            },
        ];
        let quests = arcs(vec![gated]);
        let traders = vec![Trader {
            id: "prapor-id".into(),
            name: "Prapor".into(),
            normalized_name: "prapor".into(),
        }];
        let mut settings = tracking();
        settings.player_level = 1;
        settings.trader_levels.insert("prapor".into(), 1.0);

        assert!(is_quest_active("gated", &quests, &traders, &settings));
    }

    // ── Objectives and ordering ──────────────────────────────────────

    #[test]
    fn objectives_are_annotated_and_nulls_dropped() {
        let mut q = quest("q");
        q.objectives = vec![None, Some(objective("a")), Some(objective("b"))];
        let quests = arcs(vec![q]);
        let settings = ModeSettings {
            objectives_completed: vec!["a".into()],
            ..ModeSettings::default()
        };

        let views = derive_quest_views(&quests, &[], &settings);
        let annotated: Vec<(&str, bool)> = views[0]
            .objectives
            .iter()
            .map(|o| (o.objective.id.as_str(), o.complete))
            .collect();

        assert_eq!(annotated, vec![("a", true), ("b", false)]);
        assert_eq!(views[0].completed_objectives(), 1);
    }

    #[test]
    fn output_preserves_input_order_and_is_idempotent() {
        let quests = arcs(vec![quest("z"), quest("a"), quest("m")]);
        let settings = tracking();

        let first = derive_quest_views(&quests, &[], &settings);
        let second = derive_quest_views(&quests, &[], &settings);

        let ids: Vec<&str> = first.iter().map(QuestView::id).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(first, second);
    }

    #[test]
    fn view_serializes_with_active_and_annotated_objectives() {
        let mut q = quest("q");
        q.objectives = vec![None, Some(objective("a"))];
        let quests = arcs(vec![q]);

        let views = derive_quest_views(&quests, &[], &ModeSettings::default());
        let json = serde_json::to_value(&views[0]).unwrap();

        assert_eq!(json["id"], "q");
        assert_eq!(json["active"], true);
        assert_eq!(
            json["objectives"],
            serde_json::json!([{ "id": "a", "optional": false, "complete": false }])
        );
    }
}

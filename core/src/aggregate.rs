//! Full-state snapshots for LOGIN / LOGOUT / SYNC events.
//!
//! Each collector reads what the host knows right now; one that has nothing
//! yet contributes an empty or zeroed object so a snapshot never aborts
//! halfway through.

use serde_json::{Map, Value, json};

use crate::catalogue::{CollectionCatalogue, CombatTaskCatalogue};
use crate::client::{GameView, QuestState};
use crate::game_ids::{COUNTER_QUEST_POINTS, DIARY_ENTRIES, CombatTaskTier};

/// Merge every snapshot collector under its fixed top-level key.
pub fn collect_all(
    view: &dyn GameView,
    combat_tasks: &CombatTaskCatalogue,
    collection: &CollectionCatalogue,
) -> Map<String, Value> {
    let mut snapshot = Map::new();
    snapshot.insert("player".to_string(), player_summary(view));
    snapshot.insert("quests".to_string(), quest_summary(view));
    snapshot.insert("diaries".to_string(), diary_summary(view));
    snapshot.insert("combatAchievements".to_string(), combat_summary(combat_tasks));
    snapshot.insert("collectionLog".to_string(), collection_summary(collection));
    snapshot
}

fn player_summary(view: &dyn GameView) -> Value {
    let Some(player) = view.player() else {
        return json!({});
    };
    let skills = view.skills();
    let total_level: u64 = skills.iter().map(|s| u64::from(s.level)).sum();
    json!({
        "username": player.username,
        "accountHash": player.account_hash,
        "world": player.world,
        "combatLevel": view.combat_level(),
        "totalLevel": total_level,
        "skills": skills,
    })
}

fn quest_summary(view: &dyn GameView) -> Value {
    let quests = view.quests();
    let count = |state: QuestState| quests.iter().filter(|q| q.state == state).count();
    json!({
        "questPoints": view.counter(COUNTER_QUEST_POINTS),
        "completed": count(QuestState::Finished),
        "inProgress": count(QuestState::InProgress),
        "total": quests.len(),
    })
}

fn diary_summary(view: &dyn GameView) -> Value {
    let completed = DIARY_ENTRIES
        .iter()
        .filter(|e| view.counter(e.counter) > e.completed_over)
        .count();
    json!({
        "completed": completed,
        "total": DIARY_ENTRIES.len(),
    })
}

fn combat_summary(catalogue: &CombatTaskCatalogue) -> Value {
    let (done, total) = catalogue.totals();
    let mut tiers = Map::new();
    if catalogue.is_built() {
        for tier in CombatTaskTier::ALL {
            let (tier_done, tier_total) = catalogue.tier_counts(tier);
            tiers.insert(
                tier.name().to_lowercase(),
                json!({ "completed": tier_done, "total": tier_total }),
            );
        }
    }
    json!({
        "completed": done,
        "total": total,
        "tiers": tiers,
    })
}

fn collection_summary(catalogue: &CollectionCatalogue) -> Value {
    let mut tabs = Map::new();
    for (tab, obtained, total) in catalogue.tab_counts() {
        tabs.insert(tab, json!({ "obtained": obtained, "total": total }));
    }
    json!({
        "obtained": catalogue.obtained_count(),
        "total": catalogue.total_items(),
        "tabs": tabs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{QuestEntry, SkillLevel, StubView};

    #[test]
    fn test_snapshot_has_all_fixed_keys() {
        let view = StubView::logged_in();
        let snapshot = collect_all(&view, &CombatTaskCatalogue::new(), &CollectionCatalogue::new());
        for key in ["player", "quests", "diaries", "combatAchievements", "collectionLog"] {
            assert!(snapshot.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_player_summary_totals_levels() {
        let mut view = StubView::logged_in();
        view.skills = vec![
            SkillLevel { name: "Attack".to_string(), level: 99, xp: 13_034_431 },
            SkillLevel { name: "Cooking".to_string(), level: 70, xp: 737_627 },
        ];
        let snapshot = collect_all(&view, &CombatTaskCatalogue::new(), &CollectionCatalogue::new());
        assert_eq!(snapshot["player"]["username"], "Wise Old Man");
        assert_eq!(snapshot["player"]["totalLevel"], 169);
        assert_eq!(snapshot["player"]["skills"][1]["name"], "Cooking");
    }

    #[test]
    fn test_quest_and_diary_counts() {
        let mut view = StubView::logged_in();
        view.set_counter(COUNTER_QUEST_POINTS, 120);
        view.set_counter(4458, 1); // Ardougne easy done
        view.set_counter(3578, 1); // Karamja easy legacy: 1 is not done
        view.quests = vec![
            QuestEntry { name: "Cook's Assistant".to_string(), state: QuestState::Finished },
            QuestEntry { name: "Dragon Slayer I".to_string(), state: QuestState::InProgress },
            QuestEntry { name: "Monkey Madness I".to_string(), state: QuestState::NotStarted },
        ];
        let snapshot = collect_all(&view, &CombatTaskCatalogue::new(), &CollectionCatalogue::new());
        assert_eq!(snapshot["quests"]["questPoints"], 120);
        assert_eq!(snapshot["quests"]["completed"], 1);
        assert_eq!(snapshot["quests"]["inProgress"], 1);
        assert_eq!(snapshot["quests"]["total"], 3);
        assert_eq!(snapshot["diaries"]["completed"], 1);
        assert_eq!(snapshot["diaries"]["total"], 48);
    }

    #[test]
    fn test_unbuilt_catalogues_contribute_zeroed_objects() {
        let view = StubView::default(); // logged out, knows nothing
        let snapshot = collect_all(&view, &CombatTaskCatalogue::new(), &CollectionCatalogue::new());
        assert_eq!(snapshot["player"], json!({}));
        assert_eq!(snapshot["combatAchievements"]["completed"], 0);
        assert_eq!(snapshot["combatAchievements"]["tiers"], json!({}));
        assert_eq!(snapshot["collectionLog"]["obtained"], 0);
    }
}

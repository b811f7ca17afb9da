//! Loot bag detector.
//!
//! Deny-listed stacks are stripped before anything else happens: they appear
//! in neither the emitted list nor the value totals. The remaining bag fires
//! when it clears the value floor, or unconditionally when it contains an
//! allow-listed or untradeable stack.

use serde_json::{Value, json};

use super::{Notifier, NotifierContext, payload, stack_json};
use crate::client::{ClientSignal, LootSourceKind};
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::SPECIALIZED_LOOT_SOURCES;

#[derive(Debug, Default)]
pub struct LootNotifier;

impl LootNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LootNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Loot
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::Loot { source, source_kind, items } = signal else {
            return None;
        };
        // Specialized sources deliver the same bag twice, once through the
        // generic NPC path and once through their own event signal. Only the
        // event path counts.
        if *source_kind == LootSourceKind::Npc && SPECIALIZED_LOOT_SOURCES.contains(source.as_str())
        {
            return None;
        }

        let mut kept: Vec<Value> = Vec::new();
        let mut market_total = 0u64;
        let mut alch_total = 0u64;
        let mut has_allowed = false;
        let mut has_untradeable = false;
        for stack in items {
            let name = ctx.view.item_name(stack.item_id);
            if ctx.filters.item_denied(&name) {
                continue;
            }
            let quantity = u64::from(stack.quantity);
            market_total += ctx.view.item_market_value(stack.item_id) * quantity;
            alch_total += ctx.view.item_alch_value(stack.item_id) * quantity;
            has_allowed |= ctx.filters.item_allowed(&name);
            has_untradeable |= !ctx.view.item_tradeable(stack.item_id);
            kept.push(stack_json(ctx.view, stack));
        }
        if kept.is_empty() {
            return None;
        }

        let floor = ctx.filters.min_loot_value.max(ctx.toggles.loot_value_floor);
        if market_total < floor && !has_allowed && !has_untradeable {
            return None;
        }

        Some(NotificationEvent::new(
            EventKind::Loot,
            payload(json!({
                "source": source,
                "sourceType": source_kind.name(),
                "items": kept,
                "marketValue": market_total,
                "alchValue": alch_total,
            })),
        ))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ItemStack;
    use crate::notifiers::testkit::Fixture;

    fn loot_signal(source: &str, kind: LootSourceKind, items: Vec<(u32, u32)>) -> ClientSignal {
        ClientSignal::Loot {
            source: source.to_string(),
            source_kind: kind,
            items: items
                .into_iter()
                .map(|(item_id, quantity)| ItemStack { item_id, quantity })
                .collect(),
        }
    }

    fn fixture() -> Fixture {
        let mut f = Fixture::new();
        f.view = f
            .view
            .with_item(1, "Twisted bow", 1_200_000_000, 600_000, true)
            .with_item(2, "Bones", 90, 0, true)
            .with_item(3, "Fire cape", 0, 0, false)
            .with_item(4, "Coal", 150, 10, true);
        f
    }

    #[test]
    fn test_value_floor_gates_emission() {
        let f = fixture();
        let mut n = LootNotifier::new();
        assert!(
            n.handle_signal(&loot_signal("Goblin", LootSourceKind::Npc, vec![(4, 2)]), &f.ctx())
                .is_none(),
            "300 gp of coal is below the floor"
        );
        let event = n
            .handle_signal(&loot_signal("Zulrah", LootSourceKind::Npc, vec![(1, 1)]), &f.ctx())
            .unwrap();
        assert_eq!(event.kind, EventKind::Loot);
        assert_eq!(event.payload["source"], "Zulrah");
        assert_eq!(event.payload["sourceType"], "NPC");
        assert_eq!(event.payload["marketValue"], 1_200_000_000u64);
    }

    #[test]
    fn test_denied_items_left_out_of_list_and_totals() {
        let mut f = fixture();
        // Both rules name the same item: deny wins, B alone survives.
        f.filters.deny_item("Bones");
        f.filters.allow_item("Bones");
        f.filters.allow_item("Coal");
        let mut n = LootNotifier::new();
        let event = n
            .handle_signal(
                &loot_signal("Goblin", LootSourceKind::Npc, vec![(2, 100), (4, 1)]),
                &f.ctx(),
            )
            .unwrap();
        let items = event.payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Coal");
        assert_eq!(event.payload["marketValue"], 150u64);
    }

    #[test]
    fn test_untradeable_stack_forces_emission() {
        let f = fixture();
        let mut n = LootNotifier::new();
        let event = n
            .handle_signal(&loot_signal("TzTok-Jad", LootSourceKind::Npc, vec![(3, 1)]), &f.ctx())
            .unwrap();
        assert_eq!(event.payload["marketValue"], 0u64);
        assert_eq!(event.payload["items"][0]["tradeable"], false);
    }

    #[test]
    fn test_all_denied_bag_is_silent() {
        let mut f = fixture();
        f.filters.allow_item("Bones");
        f.filters.deny_item("Bones");
        let mut n = LootNotifier::new();
        assert!(
            n.handle_signal(&loot_signal("Goblin", LootSourceKind::Npc, vec![(2, 5)]), &f.ctx())
                .is_none()
        );
    }

    #[test]
    fn test_specialized_source_only_fires_on_event_path() {
        let f = fixture();
        let mut n = LootNotifier::new();
        assert!(
            n.handle_signal(&loot_signal("Barrows", LootSourceKind::Npc, vec![(1, 1)]), &f.ctx())
                .is_none(),
            "generic path for a specialized source is the duplicate"
        );
        let event = n
            .handle_signal(&loot_signal("Barrows", LootSourceKind::Event, vec![(1, 1)]), &f.ctx())
            .unwrap();
        assert_eq!(event.payload["sourceType"], "EVENT");
    }

    #[test]
    fn test_local_floor_combines_with_remote_by_max() {
        let mut f = fixture();
        f.filters.min_loot_value = 100;
        f.toggles.loot_value_floor = 1_000;
        let mut n = LootNotifier::new();
        // 300 gp clears the remote floor but not the local one.
        assert!(
            n.handle_signal(&loot_signal("Goblin", LootSourceKind::Npc, vec![(4, 2)]), &f.ctx())
                .is_none()
        );
    }
}

//! Treasure trail detector.
//!
//! Completion is announced in two signals: the chat line carries the tier and
//! running count, the reward widget that opens a moment later carries the
//! items. The pending half-state lives only between the two.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::{Notifier, NotifierContext, payload, stack_json};
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::WIDGET_CLUE_REWARD;

static CLUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^You have completed (?P<count>[\d,]+) (?P<tier>\w+) Treasure Trails?\.?$")
        .expect("clue pattern is valid")
});

#[derive(Debug, Default)]
pub struct ClueNotifier {
    pending: Option<(String, u64)>,
}

impl ClueNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ClueNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Clue
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        match signal {
            ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } => {
                if let Some(caps) = CLUE_LINE.captures(text) {
                    let count = caps["count"].replace(',', "").parse::<u64>().ok()?;
                    self.pending = Some((caps["tier"].to_lowercase(), count));
                }
                None
            }
            ClientSignal::WidgetOpened { group, items, .. } if *group == WIDGET_CLUE_REWARD => {
                let (tier, count) = self.pending.take()?;
                let items: Vec<Value> =
                    items.iter().map(|stack| stack_json(ctx.view, stack)).collect();
                Some(NotificationEvent::new(
                    EventKind::Clue,
                    payload(json!({
                        "tier": tier,
                        "count": count,
                        "items": items,
                    })),
                ))
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ItemStack;
    use crate::notifiers::testkit::{Fixture, game_line};

    fn reward_widget(items: Vec<(u32, u32)>) -> ClientSignal {
        ClientSignal::WidgetOpened {
            group: WIDGET_CLUE_REWARD,
            text: vec![],
            items: items
                .into_iter()
                .map(|(item_id, quantity)| ItemStack { item_id, quantity })
                .collect(),
        }
    }

    #[test]
    fn test_line_then_widget_emits_once() {
        let mut f = Fixture::new();
        f.view = f.view.with_item(2577, "Ranger boots", 30_000_000, 200, true);
        let mut n = ClueNotifier::new();
        assert!(
            n.handle_signal(&game_line("You have completed 42 medium Treasure Trails."), &f.ctx())
                .is_none()
        );
        let event = n.handle_signal(&reward_widget(vec![(2577, 1)]), &f.ctx()).unwrap();
        assert_eq!(event.kind, EventKind::Clue);
        assert_eq!(event.payload["tier"], "medium");
        assert_eq!(event.payload["count"], 42);
        assert_eq!(event.payload["items"][0]["name"], "Ranger boots");
        // Pending state was consumed: a second widget is silent.
        assert!(n.handle_signal(&reward_widget(vec![(2577, 1)]), &f.ctx()).is_none());
    }

    #[test]
    fn test_widget_without_pending_tier_is_silent() {
        let f = Fixture::new();
        let mut n = ClueNotifier::new();
        assert!(n.handle_signal(&reward_widget(vec![(995, 50_000)]), &f.ctx()).is_none());
    }

    #[test]
    fn test_singular_first_completion() {
        let f = Fixture::new();
        let mut n = ClueNotifier::new();
        n.handle_signal(&game_line("You have completed 1 beginner Treasure Trail."), &f.ctx());
        let event = n.handle_signal(&reward_widget(vec![]), &f.ctx()).unwrap();
        assert_eq!(event.payload["tier"], "beginner");
        assert_eq!(event.payload["count"], 1);
    }

    #[test]
    fn test_reset_drops_pending() {
        let f = Fixture::new();
        let mut n = ClueNotifier::new();
        n.handle_signal(&game_line("You have completed 9 hard Treasure Trails."), &f.ctx());
        n.reset();
        assert!(n.handle_signal(&reward_widget(vec![]), &f.ctx()).is_none());
    }
}

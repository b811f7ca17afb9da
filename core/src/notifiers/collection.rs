//! Collection log detector.
//!
//! The catalogue observes the same chat line before notifier fan-out and
//! records the item in its obtained overlay; this detector only reads the
//! post-update counts for enrichment. An item the catalogue cannot resolve
//! still emits, just without the counts.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::catalogue::obtained_line_item;
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct CollectionNotifier;

impl CollectionNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for CollectionNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Collection
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } = signal else {
            return None;
        };
        let name = obtained_line_item(text)?;
        let mut body = payload(json!({ "itemName": name }));
        if let Some(info) = ctx.collection.lookup_obtained(ctx.view, name) {
            body.insert("itemId".to_string(), info.item_id.into());
            body.insert("category".to_string(), info.category.into());
            body.insert("obtained".to_string(), info.obtained.into());
            body.insert("total".to_string(), info.total.into());
        }
        Some(NotificationEvent::new(EventKind::Collection, body))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_ids::{ENUM_COLLECTION_TABS, PARAM_SECTION_CHILDREN, PARAM_SECTION_NAME};
    use crate::notifiers::testkit::{Fixture, game_line};

    /// One tab, one category, one item the catalogue knows about.
    fn catalogued() -> Fixture {
        let mut f = Fixture::new();
        f.view = f.view.with_item(100, "Tanzanite fang", 2_000_000, 100, true);
        f.view.enums.insert(ENUM_COLLECTION_TABS, vec![(0, 500)]);
        f.view.struct_texts.insert((500, PARAM_SECTION_NAME), "Bosses".to_string());
        f.view.struct_ints.insert((500, PARAM_SECTION_CHILDREN), 600);
        f.view.enums.insert(600, vec![(0, 700)]);
        f.view.struct_texts.insert((700, PARAM_SECTION_NAME), "Zulrah".to_string());
        f.view.struct_ints.insert((700, PARAM_SECTION_CHILDREN), 800);
        f.view.enums.insert(800, vec![(0, 100)]);
        f.collection.build(&f.view);
        f
    }

    #[test]
    fn test_known_item_is_enriched() {
        let mut f = catalogued();
        // The dispatcher lets the catalogue observe the line first.
        f.collection.record_obtained_by_name(&f.view, "Tanzanite fang");
        let mut n = CollectionNotifier::new();
        let event = n
            .handle_signal(
                &game_line("New item added to your collection log: Tanzanite fang"),
                &f.ctx(),
            )
            .unwrap();
        assert_eq!(event.kind, EventKind::Collection);
        assert_eq!(event.payload["itemName"], "Tanzanite fang");
        assert_eq!(event.payload["itemId"], 100);
        assert_eq!(event.payload["category"], "Zulrah");
        assert_eq!(event.payload["obtained"], 1);
        assert_eq!(event.payload["total"], 1);
    }

    #[test]
    fn test_unknown_item_still_emits() {
        let f = Fixture::new();
        let mut n = CollectionNotifier::new();
        let event = n
            .handle_signal(
                &game_line("New item added to your collection log: Mystery box"),
                &f.ctx(),
            )
            .unwrap();
        assert_eq!(event.payload["itemName"], "Mystery box");
        assert!(!event.payload.contains_key("category"));
    }

    #[test]
    fn test_plain_chat_is_silent() {
        let f = Fixture::new();
        let mut n = CollectionNotifier::new();
        assert!(n.handle_signal(&game_line("gz on the log slot!"), &f.ctx()).is_none());
    }
}

//! Chat forwarder. Only message types the host opted into are considered,
//! and only lines matching a remote forward pattern go out.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct ChatNotifier;

impl ChatNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ChatNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Chat
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind, text } = signal else {
            return None;
        };
        if !ctx.toggles.chat_message_types.iter().any(|t| t == kind.name()) {
            return None;
        }
        let pattern = ctx.filters.chat_match(text)?;
        Some(NotificationEvent::new(
            EventKind::Chat,
            payload(json!({
                "messageType": kind.name(),
                "message": text,
                "pattern": pattern,
            })),
        ))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatKind;
    use crate::notifiers::testkit::Fixture;

    fn clan_line(text: &str) -> ClientSignal {
        ClientSignal::ChatLine { kind: ChatKind::Clan, text: text.to_string() }
    }

    #[test]
    fn test_pattern_match_forwards_line() {
        let mut f = Fixture::new();
        f.filters.add_chat_pattern("drop party");
        let mut n = ChatNotifier::new();
        let event = n.handle_signal(&clan_line("Drop Party at my house!"), &f.ctx()).unwrap();
        assert_eq!(event.kind, EventKind::Chat);
        assert_eq!(event.payload["messageType"], "clan");
        assert_eq!(event.payload["message"], "Drop Party at my house!");
        assert_eq!(event.payload["pattern"], "drop party");
    }

    #[test]
    fn test_untracked_message_type_is_silent() {
        let mut f = Fixture::new();
        f.filters.add_chat_pattern("drop party");
        // Default tracked types are clan only.
        let mut n = ChatNotifier::new();
        let signal = ClientSignal::ChatLine {
            kind: ChatKind::Game,
            text: "Drop Party at my house!".to_string(),
        };
        assert!(n.handle_signal(&signal, &f.ctx()).is_none());
    }

    #[test]
    fn test_no_pattern_no_event() {
        let f = Fixture::new();
        let mut n = ChatNotifier::new();
        assert!(n.handle_signal(&clan_line("gz on the pet!"), &f.ctx()).is_none());
    }
}

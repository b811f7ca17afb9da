//! Emote detector: the "Perform" menu action names the emote as its target.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct EmoteNotifier;

impl EmoteNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for EmoteNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Emote
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        _ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::MenuActivated { option, target } = signal else {
            return None;
        };
        if option != "Perform" || target.is_empty() {
            return None;
        }
        Some(NotificationEvent::new(EventKind::Emote, payload(json!({ "emote": target }))))
    }

    fn reset(&mut self) {}
}

//! Pet drop detector. Three fixed chat templates; the "would have been
//! followed" variant means the player already owns the pet.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};

const FOLLOWED: &str = "You have a funny feeling like you're being followed";
const BACKPACK: &str = "You feel something weird sneaking into your backpack";
const DUPLICATE: &str = "You have a funny feeling like you would have been followed";

fn pet_line(text: &str) -> Option<bool> {
    if text.starts_with(DUPLICATE) {
        Some(true)
    } else if text.starts_with(FOLLOWED) || text.starts_with(BACKPACK) {
        Some(false)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct PetNotifier;

impl PetNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for PetNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Pet
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        _ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } = signal else {
            return None;
        };
        let duplicate = pet_line(text)?;
        Some(NotificationEvent::new(EventKind::Pet, payload(json!({ "duplicate": duplicate }))))
    }

    fn reset(&mut self) {}
}

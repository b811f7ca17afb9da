//! Local player death detector.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct DeathNotifier;

impl DeathNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DeathNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Death
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ActorDeath { local_player: true, .. } = signal else {
            return None;
        };
        Some(NotificationEvent::new(
            EventKind::Death,
            payload(json!({ "region": ctx.view.region_id() })),
        ))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TargetRef;
    use crate::notifiers::testkit::Fixture;

    #[test]
    fn test_own_death_carries_region() {
        let mut f = Fixture::new();
        f.view.region = 12_850;
        let mut n = DeathNotifier::new();
        let signal = ClientSignal::ActorDeath {
            target: TargetRef { id: 1, name: "Wise Old Man".to_string() },
            local_player: true,
        };
        let event = n.handle_signal(&signal, &f.ctx()).unwrap();
        assert_eq!(event.kind, EventKind::Death);
        assert_eq!(event.payload["region"], 12_850);
    }

    #[test]
    fn test_npc_deaths_are_not_ours() {
        let f = Fixture::new();
        let mut n = DeathNotifier::new();
        let signal = ClientSignal::ActorDeath {
            target: TargetRef { id: 7, name: "Zulrah".to_string() },
            local_player: false,
        };
        assert!(n.handle_signal(&signal, &f.ctx()).is_none());
    }
}

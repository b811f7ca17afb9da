//! Area entry detector: tick-polled region id with change detection.
//!
//! The last-seen region is always updated, even when a filter suppresses the
//! event, so leaving a denied region into an allowed one still reads as a
//! single entry.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct AreaNotifier {
    last_region: Option<u32>,
}

impl AreaNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for AreaNotifier {
    fn kind(&self) -> EventKind {
        EventKind::AreaEntry
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        if !matches!(signal, ClientSignal::Tick) {
            return None;
        }
        let region = ctx.view.region_id();
        if region == 0 || self.last_region == Some(region) {
            return None;
        }
        self.last_region = Some(region);
        if !ctx.filters.region_passes(region) {
            return None;
        }
        Some(NotificationEvent::new(EventKind::AreaEntry, payload(json!({ "regionId": region }))))
    }

    fn reset(&mut self) {
        self.last_region = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifiers::testkit::Fixture;

    #[test]
    fn test_region_change_emits_once() {
        let mut f = Fixture::new();
        f.view.region = 12_850;
        let mut n = AreaNotifier::new();
        let event = n.handle_signal(&ClientSignal::Tick, &f.ctx()).unwrap();
        assert_eq!(event.kind, EventKind::AreaEntry);
        assert_eq!(event.payload["regionId"], 12_850);
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_none(), "same region");

        f.view.region = 12_851;
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_some());
    }

    #[test]
    fn test_unknown_region_zero_is_skipped() {
        let mut f = Fixture::new();
        f.view.region = 0;
        let mut n = AreaNotifier::new();
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_none());
    }

    #[test]
    fn test_denied_region_updates_state_silently() {
        let mut f = Fixture::new();
        f.filters.deny_region(13_100);
        f.view.region = 13_100;
        let mut n = AreaNotifier::new();
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_none());

        // Walking out of the denied region still registers as one entry.
        f.view.region = 13_101;
        let event = n.handle_signal(&ClientSignal::Tick, &f.ctx()).unwrap();
        assert_eq!(event.payload["regionId"], 13_101);
    }

    #[test]
    fn test_allow_list_narrows_regions() {
        let mut f = Fixture::new();
        f.filters.allow_region(7_222);
        f.view.region = 5_000;
        let mut n = AreaNotifier::new();
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_none());
        f.view.region = 7_222;
        assert!(n.handle_signal(&ClientSignal::Tick, &f.ctx()).is_some());
    }
}

//! Music track detector: tick-polled change detection on the current track.

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};

#[derive(Debug, Default)]
pub struct MusicNotifier {
    last: Option<String>,
}

impl MusicNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for MusicNotifier {
    fn kind(&self) -> EventKind {
        EventKind::MusicPlayed
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        if !matches!(signal, ClientSignal::Tick) {
            return None;
        }
        let track = ctx.view.current_music_track().filter(|t| !t.is_empty());
        if track == self.last {
            return None;
        }
        self.last = track.clone();
        let track = track?;
        Some(NotificationEvent::new(EventKind::MusicPlayed, payload(json!({ "track": track }))))
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

//! Achievement diary detector.
//!
//! Diary completion counters are delta-tracked against a snapshot taken a
//! settle delay after the detector first runs in a session; counter reads
//! before that are suspect. Any observation that contradicts the snapshot (a
//! decrease, or a counter the snapshot never saw) throws the snapshot away
//! and schedules a fresh one instead of guessing.

use std::collections::HashMap;

use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ClientSignal, GameView};
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::{DIARY_ENTRIES, DiaryEntry, SETTLE_DELAY_TICKS, diary_entry};

#[derive(Debug, Default)]
pub struct DiaryNotifier {
    snapshot: HashMap<u32, i32>,
    initialized: bool,
    /// Tick at which the snapshot is (re)taken; None while initialized.
    snapshot_due: Option<u64>,
}

impl DiaryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule_snapshot(&mut self, tick: u64) {
        self.snapshot.clear();
        self.initialized = false;
        self.snapshot_due = Some(tick + SETTLE_DELAY_TICKS);
    }

    fn take_snapshot(&mut self, view: &dyn GameView) {
        self.snapshot =
            DIARY_ENTRIES.iter().map(|entry| (entry.counter, view.counter(entry.counter))).collect();
        self.initialized = true;
        self.snapshot_due = None;
    }

    fn completion_event(&self, entry: &DiaryEntry, view: &dyn GameView) -> NotificationEvent {
        let diaries_completed = DIARY_ENTRIES
            .iter()
            .filter(|e| view.counter(e.counter) > e.completed_over)
            .count();
        NotificationEvent::new(
            EventKind::Diary,
            payload(json!({
                "area": entry.area,
                "tier": entry.tier.name(),
                "tasksCompleted": view.counter(entry.done_counter),
                "tasksTotal": view.counter(entry.total_counter),
                "diariesCompleted": diaries_completed,
            })),
        )
    }
}

impl Notifier for DiaryNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Diary
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        match signal {
            ClientSignal::Tick => {
                match self.snapshot_due {
                    Some(due) if ctx.tick >= due => self.take_snapshot(ctx.view),
                    None if !self.initialized => self.schedule_snapshot(ctx.tick),
                    _ => {}
                }
                None
            }
            ClientSignal::CounterChanged { id, value } => {
                let entry = diary_entry(*id)?;
                if !self.initialized {
                    return None;
                }
                let Some(&previous) = self.snapshot.get(id) else {
                    // Desync: the snapshot predates this counter somehow.
                    self.schedule_snapshot(ctx.tick);
                    return None;
                };
                if *value < previous {
                    // Counters only move forward; a drop means stale data.
                    self.schedule_snapshot(ctx.tick);
                    return None;
                }
                if *value == previous {
                    return None;
                }
                self.snapshot.insert(*id, *value);
                (previous <= entry.completed_over && *value > entry.completed_over)
                    .then(|| self.completion_event(entry, ctx.view))
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.snapshot.clear();
        self.initialized = false;
        self.snapshot_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifiers::testkit::Fixture;

    const ARDOUGNE_EASY: u32 = 4458;
    const KARAMJA_MEDIUM: u32 = 3599;

    /// Run the detector past the settle delay so the snapshot exists.
    fn settled(f: &mut Fixture, n: &mut DiaryNotifier) {
        f.tick = 0;
        n.handle_signal(&ClientSignal::Tick, &f.ctx());
        f.tick = SETTLE_DELAY_TICKS;
        n.handle_signal(&ClientSignal::Tick, &f.ctx());
    }

    fn change(f: &mut Fixture, n: &mut DiaryNotifier, id: u32, value: i32) -> Option<NotificationEvent> {
        f.view.set_counter(id, value);
        f.tick += 1;
        n.handle_signal(&ClientSignal::CounterChanged { id, value }, &f.ctx())
    }

    #[test]
    fn test_zero_zero_two_emits_once() {
        let mut f = Fixture::new();
        f.view.set_counter(9600, 12);
        f.view.set_counter(9601, 12);
        let mut n = DiaryNotifier::new();
        settled(&mut f, &mut n);

        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 0).is_none());
        let event = change(&mut f, &mut n, ARDOUGNE_EASY, 2).unwrap();
        assert_eq!(event.payload["area"], "Ardougne");
        assert_eq!(event.payload["tier"], "Easy");
        assert_eq!(event.payload["tasksCompleted"], 12);
        assert_eq!(event.payload["tasksTotal"], 12);
        assert_eq!(event.payload["diariesCompleted"], 1);
        // Same value again: no repeat.
        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 2).is_none());
    }

    #[test]
    fn test_decrease_reinitializes_silently() {
        let mut f = Fixture::new();
        let mut n = DiaryNotifier::new();
        settled(&mut f, &mut n);

        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 2).is_some());
        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 0).is_none(), "drop is silent");
        // Uninitialized until the next snapshot lands: changes are ignored.
        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 2).is_none());
        f.tick += SETTLE_DELAY_TICKS;
        n.handle_signal(&ClientSignal::Tick, &f.ctx());
        // Counter already 2 in the new snapshot, so no phantom completion.
        assert!(change(&mut f, &mut n, ARDOUGNE_EASY, 2).is_none());
    }

    #[test]
    fn test_changes_before_settle_are_ignored() {
        let mut f = Fixture::new();
        let mut n = DiaryNotifier::new();
        f.tick = 0;
        n.handle_signal(&ClientSignal::Tick, &f.ctx());
        f.tick = 2; // settle delay not yet over
        assert!(
            n.handle_signal(
                &ClientSignal::CounterChanged { id: ARDOUGNE_EASY, value: 2 },
                &f.ctx()
            )
            .is_none()
        );
    }

    #[test]
    fn test_legacy_counter_completes_past_one() {
        let mut f = Fixture::new();
        let mut n = DiaryNotifier::new();
        settled(&mut f, &mut n);

        // Karamja medium predates the rework: 1 is still in progress.
        assert!(change(&mut f, &mut n, KARAMJA_MEDIUM, 1).is_none());
        let event = change(&mut f, &mut n, KARAMJA_MEDIUM, 2).unwrap();
        assert_eq!(event.payload["area"], "Karamja");
        assert_eq!(event.payload["tier"], "Medium");
    }

    #[test]
    fn test_unrelated_counters_are_ignored() {
        let mut f = Fixture::new();
        let mut n = DiaryNotifier::new();
        settled(&mut f, &mut n);
        assert!(change(&mut f, &mut n, 9999, 5).is_none());
    }

    #[test]
    fn test_diaries_completed_counts_across_areas() {
        let mut f = Fixture::new();
        // Two other diaries already done at snapshot time.
        f.view.set_counter(4459, 1);
        f.view.set_counter(4460, 1);
        let mut n = DiaryNotifier::new();
        settled(&mut f, &mut n);

        let event = change(&mut f, &mut n, ARDOUGNE_EASY, 1).unwrap();
        assert_eq!(event.payload["diariesCompleted"], 3);
    }
}

//! Combat achievement detector.
//!
//! The completion line carries tier and task name; a trailing points suffix
//! is stripped. When the task catalogue is built, the event is enriched with
//! per-tier progress read after the catalogue synced this tick.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::CombatTaskTier;

static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Congratulations, you've completed an? (?P<tier>\w+) combat task: (?P<task>.+?)(?: \(\d+ points?\))?\.?$",
    )
    .expect("combat task pattern is valid")
});

#[derive(Debug, Default)]
pub struct CombatAchievementNotifier;

impl CombatAchievementNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for CombatAchievementNotifier {
    fn kind(&self) -> EventKind {
        EventKind::CombatAchievement
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } = signal else {
            return None;
        };
        let caps = TASK_LINE.captures(text)?;
        let tier = &caps["tier"];
        let task = &caps["task"];

        let mut body = payload(json!({
            "tier": tier,
            "task": task,
        }));
        if ctx.combat_tasks.is_built()
            && let Some(parsed) = CombatTaskTier::from_name(tier)
        {
            let (done, total) = ctx.combat_tasks.tier_counts(parsed);
            body.insert("tierCompleted".to_string(), done.into());
            body.insert("tierTotal".to_string(), total.into());
        }
        Some(NotificationEvent::new(EventKind::CombatAchievement, body))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifiers::testkit::{Fixture, game_line};

    #[test]
    fn test_points_suffix_stripped() {
        let f = Fixture::new();
        let mut n = CombatAchievementNotifier::new();
        let event = n
            .handle_signal(
                &game_line(
                    "Congratulations, you've completed a Hard combat task: Kill the beast (5 points).",
                ),
                &f.ctx(),
            )
            .unwrap();
        assert_eq!(event.kind, EventKind::CombatAchievement);
        assert_eq!(event.payload["tier"], "Hard");
        assert_eq!(event.payload["task"], "Kill the beast");
    }

    #[test]
    fn test_vowel_tier_article() {
        let f = Fixture::new();
        let mut n = CombatAchievementNotifier::new();
        let event = n
            .handle_signal(
                &game_line(
                    "Congratulations, you've completed an easy combat task: A Slow Death.",
                ),
                &f.ctx(),
            )
            .unwrap();
        assert_eq!(event.payload["tier"], "easy");
        assert_eq!(event.payload["task"], "A Slow Death");
    }

    #[test]
    fn test_task_name_keeps_inner_parentheses() {
        let f = Fixture::new();
        let mut n = CombatAchievementNotifier::new();
        let event = n
            .handle_signal(
                &game_line(
                    "Congratulations, you've completed a master combat task: Perfect Zulrah (Trio) (6 points).",
                ),
                &f.ctx(),
            )
            .unwrap();
        assert_eq!(event.payload["task"], "Perfect Zulrah (Trio)");
    }

    #[test]
    fn test_unrelated_congratulations_is_silent() {
        let f = Fixture::new();
        let mut n = CombatAchievementNotifier::new();
        assert!(
            n.handle_signal(
                &game_line("Congratulations, you've just advanced your Attack level."),
                &f.ctx()
            )
            .is_none()
        );
    }
}

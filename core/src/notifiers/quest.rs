//! Quest completion detector. The completion scroll widget carries the quest
//! name in its text lines; quest points are read the same tick.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ClientSignal, QuestState};
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::{COUNTER_QUEST_POINTS, WIDGET_QUEST_COMPLETED};

static QUEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Congratulations! )?You have completed (?P<quest>.+?)!?$")
        .expect("quest pattern is valid")
});

#[derive(Debug, Default)]
pub struct QuestNotifier;

impl QuestNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for QuestNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Quest
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::WidgetOpened { group, text, .. } = signal else {
            return None;
        };
        if *group != WIDGET_QUEST_COMPLETED {
            return None;
        }
        let quest = text
            .iter()
            .find_map(|line| QUEST_LINE.captures(line))
            .map(|caps| caps["quest"].to_string())?;
        let finished =
            ctx.view.quests().iter().filter(|q| q.state == QuestState::Finished).count();
        Some(NotificationEvent::new(
            EventKind::Quest,
            payload(json!({
                "quest": quest,
                "questPoints": ctx.view.counter(COUNTER_QUEST_POINTS),
                "questsCompleted": finished,
            })),
        ))
    }

    fn reset(&mut self) {}
}

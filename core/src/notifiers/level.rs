//! Level-up detector, including the level-99 template which names no number.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};

static ADVANCED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Congratulations, you've just advanced your (?P<skill>[A-Za-z]+) level\. You are now level (?P<level>\d+)\.$",
    )
    .expect("level pattern is valid")
});

static MAXED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Congratulations, you've reached the highest possible (?P<skill>[A-Za-z]+) level of 99\.$",
    )
    .expect("level 99 pattern is valid")
});

fn parse_line(text: &str) -> Option<(String, u32)> {
    if let Some(caps) = ADVANCED_LINE.captures(text) {
        let level = caps["level"].parse::<u32>().ok()?;
        return Some((caps["skill"].to_string(), level));
    }
    MAXED_LINE.captures(text).map(|caps| (caps["skill"].to_string(), 99))
}

#[derive(Debug, Default)]
pub struct LevelNotifier;

impl LevelNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LevelNotifier {
    fn kind(&self) -> EventKind {
        EventKind::Level
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } = signal else {
            return None;
        };
        let (skill, level) = parse_line(text)?;
        Some(NotificationEvent::new(
            EventKind::Level,
            payload(json!({
                "skill": skill,
                "level": level,
                "combatLevel": ctx.view.combat_level(),
            })),
        ))
    }

    fn reset(&mut self) {}
}

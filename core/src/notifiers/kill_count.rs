//! Boss kill-count detector. Stateless: one templated chat line in, one
//! event out.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Notifier, NotifierContext, payload};
use crate::client::{ChatKind, ClientSignal};
use crate::events::{EventKind, NotificationEvent};

// The metric phrase varies by content ("kill count", "chest count",
// "completion count", bare "count"); anchoring on the known phrases keeps the
// lazy boss capture from swallowing them.
static KILL_COUNT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Your (?P<boss>.+?) (?:kill count is|chest count is|completion count is|success count is|count is):? ?(?P<count>[\d,]+)\.?$",
    )
    .expect("kill count pattern is valid")
});

#[derive(Debug, Default)]
pub struct KillCountNotifier;

impl KillCountNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn parse_line(text: &str) -> Option<(String, u64)> {
    let caps = KILL_COUNT_LINE.captures(text)?;
    let boss = caps["boss"].trim();
    // Two templates put a qualifier in front of the name.
    let boss = boss.strip_prefix("subdued ").unwrap_or(boss);
    let boss = boss.strip_prefix("completed ").unwrap_or(boss);
    let count = caps["count"].replace(',', "").parse::<u64>().ok()?;
    Some((boss.to_string(), count))
}

impl Notifier for KillCountNotifier {
    fn kind(&self) -> EventKind {
        EventKind::KillCount
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        _ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        let ClientSignal::ChatLine { kind: ChatKind::Game | ChatKind::Spam, text } = signal else {
            return None;
        };
        let (boss, count) = parse_line(text)?;
        Some(NotificationEvent::new(
            EventKind::KillCount,
            payload(json!({
                "boss": boss,
                "killCount": count,
            })),
        ))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifiers::testkit::{Fixture, game_line};

    #[test]
    fn test_plain_kill_count_line() {
        let f = Fixture::new();
        let mut n = KillCountNotifier::new();
        let event =
            n.handle_signal(&game_line("Your Zulrah kill count is: 150."), &f.ctx()).unwrap();
        assert_eq!(event.kind, EventKind::KillCount);
        assert_eq!(event.payload["boss"], "Zulrah");
        assert_eq!(event.payload["killCount"], 150);
    }

    #[test]
    fn test_metric_variants() {
        assert_eq!(
            parse_line("Your Barrows chest count is: 20."),
            Some(("Barrows".to_string(), 20))
        );
        assert_eq!(
            parse_line("Your Chambers of Xeric count is: 57."),
            Some(("Chambers of Xeric".to_string(), 57))
        );
        assert_eq!(
            parse_line("Your Gauntlet completion count is: 10."),
            Some(("Gauntlet".to_string(), 10))
        );
        assert_eq!(
            parse_line("Your subdued Wintertodt count is: 309."),
            Some(("Wintertodt".to_string(), 309))
        );
        assert_eq!(
            parse_line("Your completed Theatre of Blood count is: 4."),
            Some(("Theatre of Blood".to_string(), 4))
        );
    }

    #[test]
    fn test_thousands_separators_stripped() {
        assert_eq!(
            parse_line("Your Kree'arra kill count is: 1,204."),
            Some(("Kree'arra".to_string(), 1_204))
        );
    }

    #[test]
    fn test_near_miss_lines_are_silent() {
        let f = Fixture::new();
        let mut n = KillCountNotifier::new();
        for text in [
            "Your heart is racing.",
            "Zulrah kill count is: 150.",
            "Your Zulrah kill count is: soon.",
        ] {
            assert!(n.handle_signal(&game_line(text), &f.ctx()).is_none(), "{text}");
        }
    }

    #[test]
    fn test_clan_lines_ignored() {
        let f = Fixture::new();
        let mut n = KillCountNotifier::new();
        let signal = ClientSignal::ChatLine {
            kind: ChatKind::Clan,
            text: "Your Zulrah kill count is: 150.".to_string(),
        };
        assert!(n.handle_signal(&signal, &f.ctx()).is_none());
    }
}

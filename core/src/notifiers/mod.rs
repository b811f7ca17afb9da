//! Event detectors.
//!
//! One notifier per [`EventKind`], each a small state machine fed the raw
//! [`ClientSignal`] stream by the dispatcher. A notifier owns only its own
//! session state, reads everything else through [`NotifierContext`], and
//! emits at most one event per real-world occurrence. Parse failures are
//! silent: a line that almost matches is not an event.

mod area;
mod chat;
mod clue;
mod collection;
mod combat_achievement;
mod death;
mod detailed_kill;
mod diary;
mod emote;
mod kill_count;
mod level;
mod loot;
mod music;
mod pet;
mod quest;


pub use area::AreaNotifier;
pub use chat::ChatNotifier;
pub use clue::ClueNotifier;
pub use collection::CollectionNotifier;
pub use combat_achievement::CombatAchievementNotifier;
pub use death::DeathNotifier;
pub use detailed_kill::DetailedKillNotifier;
pub use diary::DiaryNotifier;
pub use emote::EmoteNotifier;
pub use kill_count::KillCountNotifier;
pub use level::LevelNotifier;
pub use loot::LootNotifier;
pub use music::MusicNotifier;
pub use pet::PetNotifier;
pub use quest::QuestNotifier;

use serde_json::{Map, Value, json};

use crate::catalogue::{CollectionCatalogue, CombatTaskCatalogue};
use crate::client::{ClientSignal, GameView, ItemStack};
use crate::events::{EventKind, NotificationEvent};
use crate::filters::FilterSet;
use reval_types::NotifierToggles;

/// Everything a notifier may read while handling one signal. Rebuilt by the
/// dispatcher per signal; notifiers must not cache it.
pub struct NotifierContext<'a> {
    pub view: &'a dyn GameView,
    pub filters: &'a FilterSet,
    pub toggles: &'a NotifierToggles,
    pub combat_tasks: &'a CombatTaskCatalogue,
    pub collection: &'a CollectionCatalogue,
    /// Dispatcher tick count; never goes backwards, not reset by logout.
    pub tick: u64,
}

impl NotifierContext<'_> {
    /// Local toggle AND remote filter flag. Either side can switch a kind off.
    pub fn enabled_for(&self, kind: EventKind) -> bool {
        self.toggle_for(kind) && self.filters.kind_enabled(kind)
    }

    fn toggle_for(&self, kind: EventKind) -> bool {
        let t = self.toggles;
        match kind {
            EventKind::Loot => t.loot,
            EventKind::Pet => t.pet,
            EventKind::Quest => t.quest,
            EventKind::Level => t.level,
            EventKind::KillCount => t.kill_count,
            EventKind::Clue => t.clue,
            EventKind::Diary => t.diary,
            EventKind::CombatAchievement => t.combat_achievement,
            EventKind::Collection => t.collection,
            EventKind::Death => t.death,
            EventKind::DetailedKill => t.detailed_kill,
            EventKind::Emote => t.emote,
            EventKind::Chat => t.chat,
            EventKind::MusicPlayed => t.music,
            EventKind::AreaEntry => t.area_entry,
            EventKind::Login | EventKind::Logout | EventKind::Sync => t.session_snapshots,
        }
    }
}

/// One stateful detector.
///
/// `handle_signal` runs on the host's callback thread and must not block;
/// anything slow happens downstream of the sink. `reset` drops all session
/// state and is called on logout.
pub trait Notifier {
    fn kind(&self) -> EventKind;

    /// Whether this notifier should see signals at all right now.
    fn enabled(&self, ctx: &NotifierContext<'_>) -> bool {
        ctx.enabled_for(self.kind())
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent>;

    fn reset(&mut self);
}

/// The full detector registry, in emission-priority order.
pub fn default_notifiers() -> Vec<Box<dyn Notifier + Send>> {
    vec![
        Box::new(LootNotifier::new()),
        Box::new(PetNotifier::new()),
        Box::new(QuestNotifier::new()),
        Box::new(LevelNotifier::new()),
        Box::new(KillCountNotifier::new()),
        Box::new(ClueNotifier::new()),
        Box::new(DiaryNotifier::new()),
        Box::new(CombatAchievementNotifier::new()),
        Box::new(CollectionNotifier::new()),
        Box::new(DeathNotifier::new()),
        Box::new(DetailedKillNotifier::new()),
        Box::new(EmoteNotifier::new()),
        Box::new(ChatNotifier::new()),
        Box::new(MusicNotifier::new()),
        Box::new(AreaNotifier::new()),
    ]
}

/// Unwrap a `json!` object literal into an event payload.
pub(crate) fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Wire shape shared by every item list a notifier emits.
pub(crate) fn stack_json(view: &dyn GameView, stack: &ItemStack) -> Value {
    json!({
        "itemId": stack.item_id,
        "name": view.item_name(stack.item_id),
        "quantity": stack.quantity,
        "unitValue": view.item_market_value(stack.item_id),
        "tradeable": view.item_tradeable(stack.item_id),
    })
}

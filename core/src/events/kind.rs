use std::fmt;

use serde::{Deserialize, Serialize};

/// Every event the pipeline can emit. Closed set: the collector's wire names
/// are part of its contract and adding a kind is a coordinated change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Loot,
    Pet,
    Quest,
    Level,
    KillCount,
    Clue,
    Diary,
    CombatAchievement,
    Collection,
    Death,
    DetailedKill,
    Emote,
    Chat,
    MusicPlayed,
    Login,
    Logout,
    Sync,
    AreaEntry,
}

impl EventKind {
    pub const ALL: [EventKind; 18] = [
        EventKind::Loot,
        EventKind::Pet,
        EventKind::Quest,
        EventKind::Level,
        EventKind::KillCount,
        EventKind::Clue,
        EventKind::Diary,
        EventKind::CombatAchievement,
        EventKind::Collection,
        EventKind::Death,
        EventKind::DetailedKill,
        EventKind::Emote,
        EventKind::Chat,
        EventKind::MusicPlayed,
        EventKind::Login,
        EventKind::Logout,
        EventKind::Sync,
        EventKind::AreaEntry,
    ];

    /// The `eventType` string sent to the collector.
    pub fn wire_name(self) -> &'static str {
        match self {
            EventKind::Loot => "LOOT",
            EventKind::Pet => "PET",
            EventKind::Quest => "QUEST",
            EventKind::Level => "LEVEL",
            EventKind::KillCount => "KILL_COUNT",
            EventKind::Clue => "CLUE",
            EventKind::Diary => "DIARY",
            EventKind::CombatAchievement => "COMBAT_ACHIEVEMENT",
            EventKind::Collection => "COLLECTION",
            EventKind::Death => "DEATH",
            EventKind::DetailedKill => "DETAILED_KILL",
            EventKind::Emote => "EMOTE",
            EventKind::Chat => "CHAT",
            EventKind::MusicPlayed => "MUSIC_PLAYED",
            EventKind::Login => "LOGIN",
            EventKind::Logout => "LOGOUT",
            EventKind::Sync => "SYNC",
            EventKind::AreaEntry => "AREA_ENTRY",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.wire_name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

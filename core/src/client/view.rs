use serde::{Deserialize, Serialize};

/// Identity of the logged-in player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub username: String,
    pub account_hash: u64,
    pub world: u32,
}

/// Clan membership as the host currently knows it. Absent entirely for the
/// first few ticks after login while the clan channel loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMembership {
    pub clan_name: String,
    /// Host rank ordinal; higher is more senior.
    pub rank: i32,
}

/// One skill with its live level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevel {
    pub name: String,
    pub level: u32,
    pub xp: u64,
}

/// Where the host tracks a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestState {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestEntry {
    pub name: String,
    pub state: QuestState,
}

/// Read side of the host boundary: polled lookups against live client state.
///
/// Everything here is cheap, synchronous, and only valid on the host's
/// callback thread. The pipeline never caches these reads across ticks
/// except where a detector's contract says it does (snapshots).
pub trait GameView {
    fn logged_in(&self) -> bool;
    fn player(&self) -> Option<PlayerIdentity>;
    fn clan(&self) -> Option<ClanMembership>;

    /// Merged varbit/varp read; 0 when the id is unknown.
    fn counter(&self, id: u32) -> i32;

    fn region_id(&self) -> u32;
    fn combat_level(&self) -> u32;
    fn skills(&self) -> Vec<SkillLevel>;
    fn quests(&self) -> Vec<QuestEntry>;
    fn equipped_weapon(&self) -> Option<String>;
    fn current_music_track(&self) -> Option<String>;

    // Item reference tables
    fn item_name(&self, item_id: u32) -> String;
    /// Market value per unit.
    fn item_market_value(&self, item_id: u32) -> u64;
    /// High alchemy value per unit.
    fn item_alch_value(&self, item_id: u32) -> u64;
    fn item_tradeable(&self, item_id: u32) -> bool;

    // Struct/enum composition tables, used during catalogue construction.
    fn enum_entries(&self, enum_id: u32) -> Vec<(i32, i32)>;
    fn struct_text(&self, struct_id: u32, param: u32) -> Option<String>;
    fn struct_int(&self, struct_id: u32, param: u32) -> Option<i64>;
}

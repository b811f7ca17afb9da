//! Scripted [`GameView`] used by unit tests and the replay harness.
//!
//! Everything is plain public state so a test can set exactly the client
//! shape it needs and mutate it between signals.

use std::collections::HashMap;

use super::view::{ClanMembership, GameView, PlayerIdentity, QuestEntry, SkillLevel};

/// Reference-table row for one item id.
#[derive(Debug, Clone, Default)]
pub struct StubItem {
    pub name: String,
    pub market_value: u64,
    pub alch_value: u64,
    pub tradeable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StubView {
    pub logged_in: bool,
    pub player: Option<PlayerIdentity>,
    pub clan: Option<ClanMembership>,
    pub counters: HashMap<u32, i32>,
    pub region: u32,
    pub combat_level: u32,
    pub skills: Vec<SkillLevel>,
    pub quests: Vec<QuestEntry>,
    pub weapon: Option<String>,
    pub music_track: Option<String>,
    pub items: HashMap<u32, StubItem>,
    pub enums: HashMap<u32, Vec<(i32, i32)>>,
    pub struct_texts: HashMap<(u32, u32), String>,
    pub struct_ints: HashMap<(u32, u32), i64>,
}

impl StubView {
    pub fn logged_in() -> Self {
        Self {
            logged_in: true,
            player: Some(PlayerIdentity {
                username: "Wise Old Man".to_string(),
                account_hash: 0x5eed,
                world: 330,
            }),
            combat_level: 126,
            ..Self::default()
        }
    }

    pub fn set_counter(&mut self, id: u32, value: i32) {
        self.counters.insert(id, value);
    }

    pub fn with_item(
        mut self,
        item_id: u32,
        name: &str,
        market_value: u64,
        alch_value: u64,
        tradeable: bool,
    ) -> Self {
        self.items.insert(
            item_id,
            StubItem { name: name.to_string(), market_value, alch_value, tradeable },
        );
        self
    }

    pub fn with_clan(mut self, clan_name: &str, rank: i32) -> Self {
        self.clan = Some(ClanMembership { clan_name: clan_name.to_string(), rank });
        self
    }
}

impl GameView for StubView {
    fn logged_in(&self) -> bool {
        self.logged_in
    }

    fn player(&self) -> Option<PlayerIdentity> {
        self.player.clone()
    }

    fn clan(&self) -> Option<ClanMembership> {
        self.clan.clone()
    }

    fn counter(&self, id: u32) -> i32 {
        self.counters.get(&id).copied().unwrap_or(0)
    }

    fn region_id(&self) -> u32 {
        self.region
    }

    fn combat_level(&self) -> u32 {
        self.combat_level
    }

    fn skills(&self) -> Vec<SkillLevel> {
        self.skills.clone()
    }

    fn quests(&self) -> Vec<QuestEntry> {
        self.quests.clone()
    }

    fn equipped_weapon(&self) -> Option<String> {
        self.weapon.clone()
    }

    fn current_music_track(&self) -> Option<String> {
        self.music_track.clone()
    }

    fn item_name(&self, item_id: u32) -> String {
        self.items
            .get(&item_id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| format!("Item {item_id}"))
    }

    fn item_market_value(&self, item_id: u32) -> u64 {
        self.items.get(&item_id).map(|i| i.market_value).unwrap_or(0)
    }

    fn item_alch_value(&self, item_id: u32) -> u64 {
        self.items.get(&item_id).map(|i| i.alch_value).unwrap_or(0)
    }

    fn item_tradeable(&self, item_id: u32) -> bool {
        self.items.get(&item_id).map(|i| i.tradeable).unwrap_or(true)
    }

    fn enum_entries(&self, enum_id: u32) -> Vec<(i32, i32)> {
        self.enums.get(&enum_id).cloned().unwrap_or_default()
    }

    fn struct_text(&self, struct_id: u32, param: u32) -> Option<String> {
        self.struct_texts.get(&(struct_id, param)).cloned()
    }

    fn struct_int(&self, struct_id: u32, param: u32) -> Option<i64> {
        self.struct_ints.get(&(struct_id, param)).copied()
    }
}

use serde::{Deserialize, Serialize};

/// Where a chat line came from, as tagged by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Game,
    Spam,
    Clan,
    Broadcast,
}

impl ChatKind {
    pub fn name(self) -> &'static str {
        match self {
            ChatKind::Game => "game",
            ChatKind::Spam => "spam",
            ChatKind::Clan => "clan",
            ChatKind::Broadcast => "broadcast",
        }
    }
}

/// What produced a loot bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootSourceKind {
    Npc,
    Player,
    Event,
}

impl LootSourceKind {
    pub fn name(self) -> &'static str {
        match self {
            LootSourceKind::Npc => "NPC",
            LootSourceKind::Player => "PLAYER",
            LootSourceKind::Event => "EVENT",
        }
    }
}

/// One item stack as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: u32,
    pub quantity: u32,
}

/// A combat participant, identified stably for the life of the encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    pub id: u64,
    pub name: String,
}

/// Login-state transitions the pipeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedIn,
    Hopping,
    LoginScreen,
}

/// One callback from the host client, in arrival order.
///
/// The host's event bus is reduced to this closed set of typed values; the
/// dispatcher is their single consumer and fans them out on the host's
/// logical thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum ClientSignal {
    // Cadence
    Tick,

    // Text stream
    ChatLine {
        kind: ChatKind,
        text: String,
    },

    // Polled-state deltas
    CounterChanged {
        id: u32,
        value: i32,
    },

    // UI surfaces
    WidgetOpened {
        group: u32,
        text: Vec<String>,
        items: Vec<ItemStack>,
    },
    MenuActivated {
        option: String,
        target: String,
    },

    // Combat
    CombatHit {
        target: TargetRef,
        amount: u32,
        mine: bool,
    },
    ActorDeath {
        target: TargetRef,
        local_player: bool,
    },

    // Drops
    Loot {
        source: String,
        source_kind: LootSourceKind,
        items: Vec<ItemStack>,
    },

    // Session lifecycle
    StateChanged {
        state: SessionState,
    },
    SyncRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_script_round_trip() {
        let signal = ClientSignal::Loot {
            source: "Zulrah".to_string(),
            source_kind: LootSourceKind::Npc,
            items: vec![ItemStack { item_id: 12922, quantity: 1 }],
        };
        let json = serde_json::to_string(&signal).unwrap();
        assert!(json.contains("\"signal\":\"loot\""));
        let back: ClientSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(signal, back);
    }

    #[test]
    fn test_tick_is_bare() {
        let json = serde_json::to_string(&ClientSignal::Tick).unwrap();
        assert_eq!(json, r#"{"signal":"tick"}"#);
    }
}

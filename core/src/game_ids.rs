//! Static client identifiers and reference tables the detectors key off.
//!
//! Counter ids name the host's merged varbit/varp space. Widget ids are
//! top-level interface group ids. None of these change at runtime; anything
//! dynamic comes from the filter store instead.

// ─────────────────────────────────────────────────────────────────────────────
// Counters
// ─────────────────────────────────────────────────────────────────────────────

/// Special attack energy, percent times ten (1000 = full bar).
pub const COUNTER_SPECIAL_ENERGY: u32 = 300;

/// Quest points.
pub const COUNTER_QUEST_POINTS: u32 = 101;

// ─────────────────────────────────────────────────────────────────────────────
// Widget groups
// ─────────────────────────────────────────────────────────────────────────────

/// Reward chest shown when a treasure trail is completed.
pub const WIDGET_CLUE_REWARD: u32 = 73;

/// Quest completion scroll.
pub const WIDGET_QUEST_COMPLETED: u32 = 153;

/// Collection log window; opening a page is the obtained-item capture point.
pub const WIDGET_COLLECTION_LOG: u32 = 621;

// ─────────────────────────────────────────────────────────────────────────────
// Timing
// ─────────────────────────────────────────────────────────────────────────────

/// Ticks to wait after login before progress counters can be trusted.
pub const SETTLE_DELAY_TICKS: u64 = 8;

/// Length of the special-attack window, in ticks, counted from the
/// energy-drop tick inclusive.
pub const SPECIAL_WINDOW_TICKS: u64 = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Loot sources
// ─────────────────────────────────────────────────────────────────────────────

/// Sources that deliver the same drop twice: once through the generic NPC
/// path and once through a dedicated event signal. Drops from these are
/// reported only via the event path.
pub static SPECIALIZED_LOOT_SOURCES: phf::Set<&'static str> = phf::phf_set! {
    "Barrows",
    "The Gauntlet",
    "The Corrupted Gauntlet",
    "Wintertodt",
    "Tempoross",
    "Guardians of the Rift",
    "The Whisperer",
    "Lunar Chest",
    "Fortis Colosseum",
    "Hespori",
};

// ─────────────────────────────────────────────────────────────────────────────
// Achievement diaries
// ─────────────────────────────────────────────────────────────────────────────

/// Diary difficulty tiers, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiaryTier {
    Easy,
    Medium,
    Hard,
    Elite,
}

impl DiaryTier {
    pub fn name(self) -> &'static str {
        match self {
            DiaryTier::Easy => "Easy",
            DiaryTier::Medium => "Medium",
            DiaryTier::Hard => "Hard",
            DiaryTier::Elite => "Elite",
        }
    }
}

/// One tracked diary completion counter plus the derived task counters read
/// when it crosses its threshold.
#[derive(Debug, Clone, Copy)]
pub struct DiaryEntry {
    /// Completion counter the host mutates when the diary state changes.
    pub counter: u32,
    pub area: &'static str,
    pub tier: DiaryTier,
    /// The diary is complete once the counter exceeds this value. Most
    /// counters flip 0 -> 1; the Karamja easy/medium/hard counters predate
    /// the rework and count 0 -> 2.
    pub completed_over: i32,
    /// Derived counter holding the number of finished tasks for this tier.
    pub done_counter: u32,
    /// Derived counter holding the total task count for this tier.
    pub total_counter: u32,
}

/// Every diary counter the pipeline watches, ordered by area then tier.
pub const DIARY_ENTRIES: &[DiaryEntry] = &[
    DiaryEntry { counter: 4458, area: "Ardougne", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9600, total_counter: 9601 },
    DiaryEntry { counter: 4459, area: "Ardougne", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9602, total_counter: 9603 },
    DiaryEntry { counter: 4460, area: "Ardougne", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9604, total_counter: 9605 },
    DiaryEntry { counter: 4461, area: "Ardougne", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9606, total_counter: 9607 },
    DiaryEntry { counter: 4483, area: "Desert", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9608, total_counter: 9609 },
    DiaryEntry { counter: 4484, area: "Desert", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9610, total_counter: 9611 },
    DiaryEntry { counter: 4485, area: "Desert", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9612, total_counter: 9613 },
    DiaryEntry { counter: 4486, area: "Desert", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9614, total_counter: 9615 },
    DiaryEntry { counter: 4462, area: "Falador", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9616, total_counter: 9617 },
    DiaryEntry { counter: 4463, area: "Falador", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9618, total_counter: 9619 },
    DiaryEntry { counter: 4464, area: "Falador", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9620, total_counter: 9621 },
    DiaryEntry { counter: 4465, area: "Falador", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9622, total_counter: 9623 },
    DiaryEntry { counter: 4491, area: "Fremennik", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9624, total_counter: 9625 },
    DiaryEntry { counter: 4492, area: "Fremennik", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9626, total_counter: 9627 },
    DiaryEntry { counter: 4493, area: "Fremennik", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9628, total_counter: 9629 },
    DiaryEntry { counter: 4494, area: "Fremennik", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9630, total_counter: 9631 },
    DiaryEntry { counter: 4475, area: "Kandarin", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9632, total_counter: 9633 },
    DiaryEntry { counter: 4476, area: "Kandarin", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9634, total_counter: 9635 },
    DiaryEntry { counter: 4477, area: "Kandarin", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9636, total_counter: 9637 },
    DiaryEntry { counter: 4478, area: "Kandarin", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9638, total_counter: 9639 },
    DiaryEntry { counter: 3578, area: "Karamja", tier: DiaryTier::Easy, completed_over: 1, done_counter: 9640, total_counter: 9641 },
    DiaryEntry { counter: 3599, area: "Karamja", tier: DiaryTier::Medium, completed_over: 1, done_counter: 9642, total_counter: 9643 },
    DiaryEntry { counter: 3611, area: "Karamja", tier: DiaryTier::Hard, completed_over: 1, done_counter: 9644, total_counter: 9645 },
    DiaryEntry { counter: 4566, area: "Karamja", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9646, total_counter: 9647 },
    DiaryEntry { counter: 7925, area: "Kourend & Kebos", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9648, total_counter: 9649 },
    DiaryEntry { counter: 7926, area: "Kourend & Kebos", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9650, total_counter: 9651 },
    DiaryEntry { counter: 7927, area: "Kourend & Kebos", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9652, total_counter: 9653 },
    DiaryEntry { counter: 7928, area: "Kourend & Kebos", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9654, total_counter: 9655 },
    DiaryEntry { counter: 4495, area: "Lumbridge & Draynor", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9656, total_counter: 9657 },
    DiaryEntry { counter: 4496, area: "Lumbridge & Draynor", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9658, total_counter: 9659 },
    DiaryEntry { counter: 4497, area: "Lumbridge & Draynor", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9660, total_counter: 9661 },
    DiaryEntry { counter: 4498, area: "Lumbridge & Draynor", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9662, total_counter: 9663 },
    DiaryEntry { counter: 4487, area: "Morytania", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9664, total_counter: 9665 },
    DiaryEntry { counter: 4488, area: "Morytania", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9666, total_counter: 9667 },
    DiaryEntry { counter: 4489, area: "Morytania", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9668, total_counter: 9669 },
    DiaryEntry { counter: 4490, area: "Morytania", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9670, total_counter: 9671 },
    DiaryEntry { counter: 4479, area: "Varrock", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9672, total_counter: 9673 },
    DiaryEntry { counter: 4480, area: "Varrock", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9674, total_counter: 9675 },
    DiaryEntry { counter: 4481, area: "Varrock", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9676, total_counter: 9677 },
    DiaryEntry { counter: 4482, area: "Varrock", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9678, total_counter: 9679 },
    DiaryEntry { counter: 4471, area: "Western Provinces", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9680, total_counter: 9681 },
    DiaryEntry { counter: 4472, area: "Western Provinces", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9682, total_counter: 9683 },
    DiaryEntry { counter: 4473, area: "Western Provinces", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9684, total_counter: 9685 },
    DiaryEntry { counter: 4474, area: "Western Provinces", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9686, total_counter: 9687 },
    DiaryEntry { counter: 4466, area: "Wilderness", tier: DiaryTier::Easy, completed_over: 0, done_counter: 9688, total_counter: 9689 },
    DiaryEntry { counter: 4467, area: "Wilderness", tier: DiaryTier::Medium, completed_over: 0, done_counter: 9690, total_counter: 9691 },
    DiaryEntry { counter: 4468, area: "Wilderness", tier: DiaryTier::Hard, completed_over: 0, done_counter: 9692, total_counter: 9693 },
    DiaryEntry { counter: 4469, area: "Wilderness", tier: DiaryTier::Elite, completed_over: 0, done_counter: 9694, total_counter: 9695 },
];

/// Look up the diary entry owning a completion counter.
pub fn diary_entry(counter: u32) -> Option<&'static DiaryEntry> {
    DIARY_ENTRIES.iter().find(|e| e.counter == counter)
}

// ─────────────────────────────────────────────────────────────────────────────
// Combat tasks
// ─────────────────────────────────────────────────────────────────────────────

/// Combat task tiers, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatTaskTier {
    Easy,
    Medium,
    Hard,
    Elite,
    Master,
    Grandmaster,
}

impl CombatTaskTier {
    pub const ALL: [CombatTaskTier; 6] = [
        CombatTaskTier::Easy,
        CombatTaskTier::Medium,
        CombatTaskTier::Hard,
        CombatTaskTier::Elite,
        CombatTaskTier::Master,
        CombatTaskTier::Grandmaster,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CombatTaskTier::Easy => "Easy",
            CombatTaskTier::Medium => "Medium",
            CombatTaskTier::Hard => "Hard",
            CombatTaskTier::Elite => "Elite",
            CombatTaskTier::Master => "Master",
            CombatTaskTier::Grandmaster => "Grandmaster",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// Reference enum listing the task structs of each tier.
pub const COMBAT_TASK_TIER_ENUMS: &[(CombatTaskTier, u32)] = &[
    (CombatTaskTier::Easy, 3981),
    (CombatTaskTier::Medium, 3982),
    (CombatTaskTier::Hard, 3983),
    (CombatTaskTier::Elite, 3984),
    (CombatTaskTier::Master, 3985),
    (CombatTaskTier::Grandmaster, 3986),
];

/// Struct params carrying a combat task's identity.
pub const PARAM_TASK_ID: u32 = 1306;
pub const PARAM_TASK_NAME: u32 = 1308;

/// Completion flags are bit-packed across these counters, 32 tasks per
/// counter, walked in order: task `n` lives at page `n / 32`, bit `n % 32`.
pub const COMBAT_TASK_PAGE_COUNTERS: &[u32] = &[
    3116, 3117, 3118, 3119, 3120, 3121, 3122, 3123, 3124, 3125, 3126, 3127, 3128, 3129, 3130,
    3131, 3132, 3133,
];

pub const BITS_PER_PAGE: i64 = 32;

// ─────────────────────────────────────────────────────────────────────────────
// Collection log
// ─────────────────────────────────────────────────────────────────────────────

/// Reference enum mapping tab index to tab struct id.
pub const ENUM_COLLECTION_TABS: u32 = 2102;

/// Name param shared by tab and category structs.
pub const PARAM_SECTION_NAME: u32 = 689;

/// Param holding the child enum id: categories for a tab struct, item ids
/// for a category struct.
pub const PARAM_SECTION_CHILDREN: u32 = 690;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diary_table_is_complete() {
        assert_eq!(DIARY_ENTRIES.len(), 48, "12 areas x 4 tiers");
        let legacy: Vec<u32> = DIARY_ENTRIES
            .iter()
            .filter(|e| e.completed_over == 1)
            .map(|e| e.counter)
            .collect();
        assert_eq!(legacy, vec![3578, 3599, 3611], "only the Karamja legacy counters");
    }

    #[test]
    fn test_diary_counters_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for entry in DIARY_ENTRIES {
            assert!(seen.insert(entry.counter), "duplicate counter {}", entry.counter);
        }
    }

    #[test]
    fn test_diary_entry_lookup() {
        let entry = diary_entry(3599).unwrap();
        assert_eq!(entry.area, "Karamja");
        assert_eq!(entry.tier, DiaryTier::Medium);
        assert_eq!(entry.completed_over, 1);
        assert!(diary_entry(1).is_none());
    }

    #[test]
    fn test_specialized_sources() {
        assert!(SPECIALIZED_LOOT_SOURCES.contains("Barrows"));
        assert!(!SPECIALIZED_LOOT_SOURCES.contains("Zulrah"));
    }

    #[test]
    fn test_tier_round_trip() {
        for tier in CombatTaskTier::ALL {
            assert_eq!(CombatTaskTier::from_name(tier.name()), Some(tier));
        }
        assert_eq!(CombatTaskTier::from_name("hard"), Some(CombatTaskTier::Hard));
        assert_eq!(CombatTaskTier::from_name("mythic"), None);
    }

    #[test]
    fn test_page_table_covers_task_space() {
        // 18 pages of 32 bits comfortably cover the current task list.
        assert!(COMBAT_TASK_PAGE_COUNTERS.len() as i64 * BITS_PER_PAGE >= 550);
    }
}

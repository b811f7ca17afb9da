//! Dynamically-fetched event filters.
//!
//! A [`FilterSet`] is an immutable value object: the store fetches a complete
//! set from the collector and publishes it with one atomic swap, so detectors
//! reading mid-refresh never see a half-updated set. Before the first
//! successful fetch (and after any failed one) the built-in defaults apply.

mod store;

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::events::EventKind;

pub use store::{FilterError, FilterStore};

/// Loot below this market value is dropped unless another rule forces it
/// through.
const DEFAULT_MIN_LOOT_VALUE: u64 = 10_000;

/// Drops nobody wants reported, even at high quantity.
const DEFAULT_DENIED_ITEMS: &[&str] =
    &["bones", "big bones", "ashes", "vial of water", "jug of wine"];

/// Thresholds, allow/deny lists and per-kind enable flags, replaced as one
/// unit on every successful refresh.
///
/// Name lists are matched case-insensitively; region lists are numeric
/// ids. The mutating helpers keep the lowercase invariant so host code can
/// layer local rules over the defaults.
#[derive(Debug, Clone)]
pub struct FilterSet {
    /// Minimum market value before a loot bag notifies on value alone.
    pub min_loot_value: u64,
    allowed_items: HashSet<String>,
    denied_items: HashSet<String>,
    allowed_targets: HashSet<String>,
    denied_targets: HashSet<String>,
    allowed_regions: HashSet<u32>,
    denied_regions: HashSet<u32>,
    chat_patterns: Vec<String>,
    enabled: HashMap<EventKind, bool>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            min_loot_value: DEFAULT_MIN_LOOT_VALUE,
            allowed_items: HashSet::new(),
            denied_items: DEFAULT_DENIED_ITEMS.iter().map(|s| s.to_string()).collect(),
            allowed_targets: HashSet::new(),
            denied_targets: HashSet::new(),
            allowed_regions: HashSet::new(),
            denied_regions: HashSet::new(),
            chat_patterns: Vec::new(),
            enabled: HashMap::new(),
        }
    }
}

impl FilterSet {
    /// A kind missing from the remote map stays enabled.
    pub fn kind_enabled(&self, kind: EventKind) -> bool {
        self.enabled.get(&kind).copied().unwrap_or(true)
    }

    pub fn item_denied(&self, name: &str) -> bool {
        self.denied_items.contains(&name.to_lowercase())
    }

    pub fn item_allowed(&self, name: &str) -> bool {
        self.allowed_items.contains(&name.to_lowercase())
    }

    /// Deny wins outright; a non-empty allow-list admits only listed targets.
    pub fn target_passes(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        if self.denied_targets.contains(&key) {
            return false;
        }
        self.allowed_targets.is_empty() || self.allowed_targets.contains(&key)
    }

    /// Same precedence as [`target_passes`](Self::target_passes), on region ids.
    pub fn region_passes(&self, region: u32) -> bool {
        if self.denied_regions.contains(&region) {
            return false;
        }
        self.allowed_regions.is_empty() || self.allowed_regions.contains(&region)
    }

    /// First forward pattern contained in `text`, case-insensitive. Plain
    /// substrings, not regexes: patterns arrive from the collector and must
    /// not be able to blow up inside the client.
    pub fn chat_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.chat_patterns
            .iter()
            .find(|p| lowered.contains(p.as_str()))
            .map(|p| p.as_str())
    }

    pub fn set_enabled(&mut self, kind: EventKind, enabled: bool) {
        self.enabled.insert(kind, enabled);
    }

    pub fn allow_item(&mut self, name: &str) {
        self.allowed_items.insert(name.to_lowercase());
    }

    pub fn deny_item(&mut self, name: &str) {
        self.denied_items.insert(name.to_lowercase());
    }

    pub fn allow_target(&mut self, name: &str) {
        self.allowed_targets.insert(name.to_lowercase());
    }

    pub fn deny_target(&mut self, name: &str) {
        self.denied_targets.insert(name.to_lowercase());
    }

    pub fn allow_region(&mut self, region: u32) {
        self.allowed_regions.insert(region);
    }

    pub fn deny_region(&mut self, region: u32) {
        self.denied_regions.insert(region);
    }

    pub fn add_chat_pattern(&mut self, pattern: &str) {
        self.chat_patterns.push(pattern.to_lowercase());
    }

    /// Overlay one decoded response on the defaults. Absent fields keep their
    /// built-in values, which is what makes a partial server config safe.
    pub(crate) fn from_payload(payload: FiltersPayload) -> Self {
        let mut set = Self::default();
        if let Some(loot) = payload.loot {
            if let Some(min) = loot.min_value {
                set.min_loot_value = min;
            }
            if let Some(items) = loot.allowed_items {
                set.allowed_items = lowered(items);
            }
            if let Some(items) = loot.denied_items {
                set.denied_items = lowered(items);
            }
        }
        if let Some(kill) = payload.detailed_kill {
            if let Some(targets) = kill.allowed_targets {
                set.allowed_targets = lowered(targets);
            }
            if let Some(targets) = kill.denied_targets {
                set.denied_targets = lowered(targets);
            }
        }
        if let Some(area) = payload.area_entry {
            if let Some(regions) = area.allowed_regions {
                set.allowed_regions = regions.into_iter().collect();
            }
            if let Some(regions) = area.denied_regions {
                set.denied_regions = regions.into_iter().collect();
            }
        }
        if let Some(chat) = payload.chat {
            if let Some(patterns) = chat.patterns {
                set.chat_patterns = patterns.into_iter().map(|p| p.to_lowercase()).collect();
            }
        }
        if let Some(flags) = payload.enabled {
            for (name, on) in flags {
                match EventKind::from_wire(&name) {
                    Some(kind) => set.set_enabled(kind, on),
                    None => tracing::debug!(kind = %name, "ignoring unknown filter flag"),
                }
            }
        }
        set
    }
}

fn lowered(items: Vec<String>) -> HashSet<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}

/// Wire shape of the `event-filters` endpoint's `data` object.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct FiltersPayload {
    loot: Option<LootSection>,
    area_entry: Option<AreaSection>,
    detailed_kill: Option<KillSection>,
    chat: Option<ChatSection>,
    enabled: Option<HashMap<String, bool>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LootSection {
    min_value: Option<u64>,
    allowed_items: Option<Vec<String>>,
    denied_items: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AreaSection {
    allowed_regions: Option<Vec<u32>>,
    denied_regions: Option<Vec<u32>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KillSection {
    allowed_targets: Option<Vec<String>>,
    denied_targets: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChatSection {
    patterns: Option<Vec<String>>,
}

//! Host-facing configuration for the event pipeline.
//!
//! These are plain values: the host owns persistence and editing, the
//! pipeline only reads snapshots. Defaults are chosen so a pipeline built
//! from `PipelineConfig::default()` behaves sensibly before the first remote
//! filter set has been fetched.

use serde::{Deserialize, Serialize};

/// Remote endpoints and identity for one collector deployment.
///
/// # Examples
/// ```
/// use reval_types::CollectorConfig;
/// let c = CollectorConfig::default();
/// assert!(c.webhook_url.ends_with("/reval-webhook"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectorConfig {
    /// Base URL of the reference API (no trailing slash).
    pub api_base: String,
    /// Endpoint progress events are POSTed to.
    pub webhook_url: String,
    /// Endpoint the dynamic filter set is fetched from.
    pub filter_url: String,
    /// Sent as the `User-Agent` header on every outbound request.
    pub plugin_id: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.reval.gg/plugin".to_string(),
            webhook_url: "https://collector.reval.gg/reval-webhook".to_string(),
            filter_url: "https://api.reval.gg/event-filters".to_string(),
            plugin_id: "reval-plugin/0.1.0".to_string(),
        }
    }
}

/// Clan requirements a session must meet before anything is reported.
///
/// `min_rank` is the host's rank ordinal; higher means more senior. A member
/// whose rank is below the minimum never gets past the authorization gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClanPolicy {
    pub clan_name: String,
    pub min_rank: i32,
}

impl Default for ClanPolicy {
    fn default() -> Self {
        Self { clan_name: "Reval".to_string(), min_rank: 0 }
    }
}

/// Per-kind enable flags plus the handful of local detector knobs.
///
/// Every flag defaults to `true`; the remote filter set can only narrow
/// these, never widen them. Unknown fields in stored JSON are ignored so old
/// hosts survive new flags.
///
/// # Examples
/// ```
/// use reval_types::NotifierToggles;
/// let t: NotifierToggles = serde_json::from_str(r#"{"loot": false}"#).unwrap();
/// assert!(!t.loot);
/// assert!(t.diary);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotifierToggles {
    pub loot: bool,
    pub pet: bool,
    pub quest: bool,
    pub level: bool,
    pub kill_count: bool,
    pub clue: bool,
    pub diary: bool,
    pub combat_achievement: bool,
    pub collection: bool,
    pub death: bool,
    pub detailed_kill: bool,
    pub emote: bool,
    pub chat: bool,
    pub music: bool,
    pub area_entry: bool,
    /// Covers the LOGIN / LOGOUT / SYNC snapshot events as one switch.
    pub session_snapshots: bool,
    /// Local floor for loot value, combined with the remote minimum by max().
    pub loot_value_floor: u64,
    /// Chat message types the CHAT notifier listens to, lowercase.
    pub chat_message_types: Vec<String>,
}

impl Default for NotifierToggles {
    fn default() -> Self {
        Self {
            loot: true,
            pet: true,
            quest: true,
            level: true,
            kill_count: true,
            clue: true,
            diary: true,
            combat_achievement: true,
            collection: true,
            death: true,
            detailed_kill: true,
            emote: true,
            chat: true,
            music: true,
            area_entry: true,
            session_snapshots: true,
            loot_value_floor: 0,
            chat_message_types: vec!["clan".to_string()],
        }
    }
}

/// Everything the pipeline needs from the host at construction time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub collector: CollectorConfig,
    pub clan: ClanPolicy,
    pub toggles: NotifierToggles,
}

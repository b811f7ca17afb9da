//! Response payloads of the collector reference API.
//!
//! Field names mirror the wire contract (camelCase). Timestamps are epoch
//! milliseconds throughout, matching the event payloads.

use serde::{Deserialize, Serialize};

/// One way members earn points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSource {
    pub id: u32,
    pub name: String,
    pub points: i64,
    #[serde(default)]
    pub category: Option<String>,
}

/// A rank with its point threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankTier {
    pub name: String,
    pub min_points: i64,
    pub ordinal: i32,
}

/// The ranks + point-sources catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsCatalogue {
    pub sources: Vec<PointSource>,
    pub ranks: Vec<RankTier>,
}

/// One member's standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub account_hash: u64,
    pub username: String,
    pub points: i64,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub last_seen: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub position: u32,
    pub username: String,
    pub points: i64,
}

/// A scheduled clan event members can register for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEvent {
    pub id: u64,
    pub name: String,
    pub starts_at: i64,
    pub ends_at: i64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatus {
    pub id: u64,
    pub state: String,
    pub participants: u32,
}

/// Acknowledgement for register/cancel calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub event_id: u64,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    pub id: u32,
    pub name: String,
    pub tier: String,
    pub points: i32,
    /// Present when the query was account-scoped.
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDef {
    pub area: String,
    pub tier: String,
    pub tasks_total: u32,
    /// Present when the query was account-scoped.
    #[serde(default)]
    pub tasks_done: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDef {
    pub id: u64,
    pub name: String,
    pub metric: String,
    pub target: i64,
    /// Present when the query was account-scoped.
    #[serde(default)]
    pub progress: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: u64,
    pub name: String,
    pub metric: String,
    pub starts_at: i64,
    pub ends_at: i64,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDetail {
    #[serde(flatten)]
    pub competition: Competition,
    pub participants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionStanding {
    pub position: u32,
    pub username: String,
    pub gained: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionActivity {
    pub username: String,
    pub gained: i64,
    pub at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionProgress {
    pub username: String,
    pub gained: i64,
    #[serde(default)]
    pub target: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub closes_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDetail {
    #[serde(flatten)]
    pub vote: Vote,
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyVote {
    pub vote_id: u64,
    #[serde(default)]
    pub choice: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub vote_id: u64,
    pub choice: u32,
}

/// Ephemeral admin credentials; gates the privileged mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub code: String,
    pub permissions: Vec<String>,
}

impl AdminSession {
    pub fn allows(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.eq_ignore_ascii_case(permission))
    }
}

/// Outcome of an admin actualize run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizeSummary {
    pub members_updated: u32,
    pub points_updated: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_snapshot_optional_fields() {
        let snap: AccountSnapshot = serde_json::from_str(
            r#"{"accountHash": 7, "username": "Mod Ash", "points": 1200}"#,
        )
        .unwrap();
        assert_eq!(snap.rank, None);
        assert_eq!(snap.last_seen, None);
    }

    #[test]
    fn test_competition_detail_flattens() {
        let detail: CompetitionDetail = serde_json::from_str(
            r#"{"id": 3, "name": "Slayer week", "metric": "slayer", "startsAt": 0,
                "endsAt": 10, "state": "active", "participants": 41}"#,
        )
        .unwrap();
        assert_eq!(detail.competition.name, "Slayer week");
        assert_eq!(detail.participants, 41);
    }

    #[test]
    fn test_admin_session_permission_check() {
        let session = AdminSession {
            code: "c0de".to_string(),
            permissions: vec!["actualize".to_string()],
        };
        assert!(session.allows("ACTUALIZE"));
        assert!(!session.allows("ban"));
    }
}

//! Typed client for the collector reference API.
//!
//! Read methods run through per-endpoint TTL slots; mutation methods skip
//! the cache and proactively invalidate the read slots they make stale.
//! Cache policy:
//!
//! | data                | slot          | TTL   |
//! |---------------------|---------------|-------|
//! | points catalogue    | plain         | 5 min |
//! | account snapshot    | keyed by hash | 2 min |
//! | leaderboard         | plain         | 5 min |
//! | live events         | plain         | 1 min |
//! | achievements        | keyed by hash | 5 min |
//! | diaries             | keyed by hash | 5 min |
//! | challenges          | keyed by hash | 5 min |
//! | competitions (list) | plain         | 5 min |
//! | competition detail  | keyed by id   | 5 min |
//! | votes (list)        | plain         | 5 min |
//!
//! Everything else (statuses, sub-resource listings, my-vote) is live data
//! fetched on every call.

pub mod cache;
pub(crate) mod envelope;
mod error;
pub mod models;

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use cache::{ACCOUNT_TTL_SECS, CATALOGUE_TTL_SECS, KeyedSlot, LIVE_TTL_SECS, Slot};
use models::{
    AccountSnapshot, AchievementDef, ActualizeSummary, AdminSession, ChallengeDef, Competition,
    CompetitionActivity, CompetitionDetail, CompetitionProgress, CompetitionStanding, DiaryDef,
    EventStatus, LeaderboardEntry, LiveEvent, MyVote, PointsCatalogue, Registration, Vote,
    VoteDetail, VoteReceipt,
};

pub use error::ApiError;

/// Header carrying the admin code on privileged endpoints.
pub const HEADER_MEMBER_CODE: &str = "X-Member-Code";

/// Shared outbound HTTP client with bounded connect/read timeouts so no
/// pending callback can hang forever.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[derive(Default)]
struct ClientState {
    points: Slot<PointsCatalogue>,
    account: KeyedSlot<Option<u64>, AccountSnapshot>,
    leaderboard: Slot<Vec<LeaderboardEntry>>,
    events: Slot<Vec<LiveEvent>>,
    achievements: KeyedSlot<Option<u64>, Vec<AchievementDef>>,
    diaries: KeyedSlot<Option<u64>, Vec<DiaryDef>>,
    challenges: KeyedSlot<Option<u64>, Vec<ChallengeDef>>,
    competitions: Slot<Vec<Competition>>,
    competition_detail: KeyedSlot<u64, CompetitionDetail>,
    votes: Slot<Vec<Vote>>,
    admin: Option<AdminSession>,
}

impl ClientState {
    fn invalidate_events(&mut self) {
        self.events.clear();
    }

    fn invalidate_votes(&mut self) {
        self.votes.clear();
    }

    /// Actualize rewrites member points server-side.
    fn invalidate_points_related(&mut self) {
        self.points.clear();
        self.leaderboard.clear();
        self.account.clear();
    }

    /// Dropping the session identity makes every account-scoped slot stale.
    fn clear_session(&mut self) {
        self.admin = None;
        self.account.clear();
        self.achievements.clear();
        self.diaries.clear();
        self.challenges.clear();
    }
}

/// The collector reference client. One instance per pipeline; cheap to share
/// behind an `Arc`.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    user_agent: String,
    state: Mutex<ClientState>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
            user_agent: user_agent.into(),
            state: Mutex::new(ClientState::default()),
        }
    }

    /// The lock is only ever held for slot lookups and stores, never across
    /// I/O, so a poisoned lock still carries a usable state.
    fn lock(&self) -> MutexGuard<'_, ClientState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self
            .http
            .get(self.url(path))
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        envelope::decode_body(status, &body)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
        member_code: Option<String>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .http
            .post(self.url(path))
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        if let Some(code) = member_code {
            request = request.header(HEADER_MEMBER_CODE, code);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        envelope::decode_body(status, &body)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cached reads
    // ─────────────────────────────────────────────────────────────────────

    pub async fn points(&self) -> Result<PointsCatalogue, ApiError> {
        let cached = self.lock().points.get(CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: PointsCatalogue = self.get_json("points", &[]).await?;
        self.lock().points.put(fresh.clone(), Utc::now());
        Ok(fresh)
    }

    /// `account_hash` of `None` means the session's own account.
    pub async fn account(&self, account_hash: Option<u64>) -> Result<AccountSnapshot, ApiError> {
        let cached = self.lock().account.get(&account_hash, ACCOUNT_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let query = hash_query(account_hash);
        let fresh: AccountSnapshot = self.get_json("account", &query).await?;
        self.lock().account.put(account_hash, fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let cached = self.lock().leaderboard.get(CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: Vec<LeaderboardEntry> = self.get_json("leaderboard", &[]).await?;
        self.lock().leaderboard.put(fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn live_events(&self) -> Result<Vec<LiveEvent>, ApiError> {
        let cached = self.lock().events.get(LIVE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: Vec<LiveEvent> = self.get_json("events", &[]).await?;
        self.lock().events.put(fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn achievements(
        &self,
        account_hash: Option<u64>,
    ) -> Result<Vec<AchievementDef>, ApiError> {
        let cached = self.lock().achievements.get(&account_hash, CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let query = hash_query(account_hash);
        let fresh: Vec<AchievementDef> = self.get_json("achievements", &query).await?;
        self.lock().achievements.put(account_hash, fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn diaries(&self, account_hash: Option<u64>) -> Result<Vec<DiaryDef>, ApiError> {
        let cached = self.lock().diaries.get(&account_hash, CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let query = hash_query(account_hash);
        let fresh: Vec<DiaryDef> = self.get_json("diaries", &query).await?;
        self.lock().diaries.put(account_hash, fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn challenges(
        &self,
        account_hash: Option<u64>,
    ) -> Result<Vec<ChallengeDef>, ApiError> {
        let cached = self.lock().challenges.get(&account_hash, CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let query = hash_query(account_hash);
        let fresh: Vec<ChallengeDef> = self.get_json("challenges", &query).await?;
        self.lock().challenges.put(account_hash, fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn competitions(&self) -> Result<Vec<Competition>, ApiError> {
        let cached = self.lock().competitions.get(CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: Vec<Competition> = self.get_json("competitions", &[]).await?;
        self.lock().competitions.put(fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn competition(&self, id: u64) -> Result<CompetitionDetail, ApiError> {
        let cached = self.lock().competition_detail.get(&id, CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: CompetitionDetail =
            self.get_json(&format!("competitions/{id}"), &[]).await?;
        self.lock().competition_detail.put(id, fresh.clone(), Utc::now());
        Ok(fresh)
    }

    pub async fn votes(&self) -> Result<Vec<Vote>, ApiError> {
        let cached = self.lock().votes.get(CATALOGUE_TTL_SECS, Utc::now());
        if let Some(hit) = cached {
            return Ok(hit);
        }
        let fresh: Vec<Vote> = self.get_json("votes", &[]).await?;
        self.lock().votes.put(fresh.clone(), Utc::now());
        Ok(fresh)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Live reads (never cached)
    // ─────────────────────────────────────────────────────────────────────

    pub async fn event_status(&self, id: u64) -> Result<EventStatus, ApiError> {
        self.get_json(&format!("events/{id}/status"), &[]).await
    }

    pub async fn competitions_scheduled(&self) -> Result<Vec<Competition>, ApiError> {
        self.get_json("competitions/scheduled", &[]).await
    }

    pub async fn competitions_active(&self) -> Result<Vec<Competition>, ApiError> {
        self.get_json("competitions/active", &[]).await
    }

    pub async fn competitions_completed(&self) -> Result<Vec<Competition>, ApiError> {
        self.get_json("competitions/completed", &[]).await
    }

    pub async fn competition_leaderboard(
        &self,
        id: u64,
    ) -> Result<Vec<CompetitionStanding>, ApiError> {
        self.get_json(&format!("competitions/{id}/leaderboard"), &[]).await
    }

    pub async fn competition_activity(
        &self,
        id: u64,
    ) -> Result<Vec<CompetitionActivity>, ApiError> {
        self.get_json(&format!("competitions/{id}/activity"), &[]).await
    }

    pub async fn competition_progress(
        &self,
        id: u64,
    ) -> Result<Vec<CompetitionProgress>, ApiError> {
        self.get_json(&format!("competitions/{id}/progress"), &[]).await
    }

    pub async fn vote(&self, id: u64) -> Result<VoteDetail, ApiError> {
        self.get_json(&format!("votes/{id}"), &[]).await
    }

    pub async fn my_vote(&self, id: u64) -> Result<MyVote, ApiError> {
        self.get_json(&format!("votes/{id}/my-vote"), &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    pub async fn register_event(&self, id: u64) -> Result<Registration, ApiError> {
        let receipt: Registration =
            self.post_json(&format!("events/{id}/register"), None, None).await?;
        self.lock().invalidate_events();
        Ok(receipt)
    }

    pub async fn cancel_event(&self, id: u64) -> Result<Registration, ApiError> {
        let receipt: Registration =
            self.post_json(&format!("events/{id}/cancel"), None, None).await?;
        self.lock().invalidate_events();
        Ok(receipt)
    }

    pub async fn cast_vote(&self, id: u64, choice: u32) -> Result<VoteReceipt, ApiError> {
        let receipt: VoteReceipt = self
            .post_json(&format!("votes/{id}/cast"), Some(json!({ "choice": choice })), None)
            .await?;
        self.lock().invalidate_votes();
        Ok(receipt)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────────────────

    pub async fn admin_login(&self, code: &str) -> Result<AdminSession, ApiError> {
        let session: AdminSession = self
            .post_json("admin/login", Some(json!({ "code": code })), None)
            .await?;
        tracing::info!(permissions = session.permissions.len(), "admin session opened");
        self.lock().admin = Some(session.clone());
        Ok(session)
    }

    pub async fn admin_actualize(&self) -> Result<ActualizeSummary, ApiError> {
        let Some(session) = self.admin_session() else {
            return Err(ApiError::Rejected("admin session required".to_string()));
        };
        let summary: ActualizeSummary = self
            .post_json("admin/actualize", None, Some(session.code))
            .await?;
        self.lock().invalidate_points_related();
        Ok(summary)
    }

    pub fn admin_session(&self) -> Option<AdminSession> {
        self.lock().admin.clone()
    }

    pub fn sign_out_admin(&self) {
        self.lock().admin = None;
    }

    /// Called on logout: drops the admin session and every account-scoped
    /// cache slot.
    pub fn reset_session(&self) {
        self.lock().clear_session();
    }
}

fn hash_query(account_hash: Option<u64>) -> Vec<(&'static str, String)> {
    match account_hash {
        Some(hash) => vec![("accountHash", hash.to_string())],
        None => Vec::new(),
    }
}

use std::sync::{Arc, RwLock};

use thiserror::Error;

use super::{FilterSet, FiltersPayload};
use crate::api::ApiError;

/// Failure taxonomy for the filter endpoint, mirroring the reference API's.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rejected by collector: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<ApiError> for FilterError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => FilterError::Transport(e),
            ApiError::Rejected(msg) => FilterError::Rejected(msg),
            ApiError::Malformed(e) => FilterError::Malformed(e),
        }
    }
}

/// Holds the current [`FilterSet`] and refreshes it from the collector.
///
/// `current()` hands out the active set behind an `Arc`; a refresh decodes a
/// complete replacement off-thread and publishes it with one swap, so a
/// failed refresh can never leave a partially-merged set behind.
pub struct FilterStore {
    http: reqwest::Client,
    url: String,
    user_agent: String,
    current: RwLock<Arc<FilterSet>>,
}

impl FilterStore {
    pub fn new(http: reqwest::Client, url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            user_agent: user_agent.into(),
            current: RwLock::new(Arc::new(FilterSet::default())),
        }
    }

    /// The last successfully fetched set, or the defaults before one lands.
    pub fn current(&self) -> Arc<FilterSet> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a fully-built set. Also the host's hook for local overrides.
    pub fn publish(&self, set: FilterSet) {
        let next = Arc::new(set);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Fetch and publish a fresh set. On any failure the previous set stays
    /// in place untouched.
    pub async fn refresh(&self) -> Result<(), FilterError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let payload: FiltersPayload = crate::api::envelope::decode_body(status, &body)?;
        self.publish(FilterSet::from_payload(payload));
        tracing::debug!("filter set refreshed");
        Ok(())
    }

    /// Fire-and-forget refresh for callers on the host's callback thread,
    /// which has no ambient runtime. Failures are logged and the previous
    /// set retained.
    pub fn spawn_refresh(self: &Arc<Self>, handle: &tokio::runtime::Handle) {
        let store = Arc::clone(self);
        handle.spawn(async move {
            if let Err(e) = store.refresh().await {
                tracing::warn!(error = %e, "filter refresh failed; keeping previous set");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    /// Closed port so a refresh attempt fails fast without real network.
    fn offline_store() -> FilterStore {
        FilterStore::new(reqwest::Client::new(), "http://127.0.0.1:9/event-filters", "reval-test")
    }

    #[test]
    fn test_current_starts_with_defaults() {
        let store = offline_store();
        let set = store.current();
        assert!(set.item_denied("bones"));
        assert!(set.kind_enabled(EventKind::Loot));
    }

    #[test]
    fn test_publish_swaps_whole_set() {
        let store = offline_store();
        let before = store.current();

        let mut next = FilterSet::default();
        next.min_loot_value = 1_000_000;
        next.set_enabled(EventKind::Emote, false);
        store.publish(next);

        let after = store.current();
        assert_eq!(after.min_loot_value, 1_000_000);
        assert!(!after.kind_enabled(EventKind::Emote));
        // The handle taken before the swap still sees the old set.
        assert!(before.kind_enabled(EventKind::Emote));
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_current_unchanged() {
        let store = offline_store();
        let mut marked = FilterSet::default();
        marked.min_loot_value = 777;
        store.publish(marked);

        let err = store.refresh().await.unwrap_err();
        assert!(matches!(err, FilterError::Transport(_)));
        assert_eq!(store.current().min_loot_value, 777);
    }

    #[tokio::test]
    async fn test_spawn_refresh_absorbs_failure() {
        let store = Arc::new(offline_store());
        store.spawn_refresh(&tokio::runtime::Handle::current());
        // Loopback connection refusal lands well inside this.
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        assert!(store.current().item_denied("bones"), "defaults still active");
    }
}

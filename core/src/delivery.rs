//! Outbound event delivery.
//!
//! Fire-and-forget by contract: `submit` never blocks the host callback
//! thread and never surfaces an error to it. Serialization and compression
//! happen inline (they are cheap and infallible in practice); the POST is
//! spawned onto the runtime captured at construction time. Failures are
//! logged and the event is gone.

use std::io::Write;
use std::sync::{Arc, Mutex};

use flate2::Compression;
use flate2::write::GzEncoder;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};

use crate::events::NotificationEvent;

/// Where the dispatcher hands finished events. Implementations must be
/// callable from the host thread without blocking it.
pub trait EventSink: Send + Sync {
    fn submit(&self, event: NotificationEvent);
}

/// Gzip-JSON webhook delivery to the collector.
pub struct WebhookSink {
    http: reqwest::Client,
    url: String,
    user_agent: String,
    /// Captured at construction; `submit` runs on the host thread where no
    /// ambient runtime exists.
    handle: Option<tokio::runtime::Handle>,
}

impl WebhookSink {
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            user_agent: user_agent.into(),
            handle: tokio::runtime::Handle::try_current().ok(),
        }
    }
}

impl EventSink for WebhookSink {
    fn submit(&self, event: NotificationEvent) {
        let kind = event.kind;
        let Some(handle) = &self.handle else {
            tracing::warn!(%kind, "event dropped: no async runtime");
            return;
        };
        let body = match serde_json::to_vec(&event.wire_body()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%kind, error = %e, "event dropped: serialization failed");
                return;
            }
        };
        let compressed = match gzip_compress(&body) {
            Ok(compressed) => compressed,
            Err(e) => {
                tracing::warn!(%kind, error = %e, "event dropped: compression failed");
                return;
            }
        };
        let request = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_ENCODING, "gzip")
            .header(USER_AGENT, &self.user_agent)
            .body(compressed);
        handle.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(%kind, "event delivered");
                }
                Ok(response) => {
                    tracing::warn!(%kind, status = %response.status(), "collector rejected event");
                }
                Err(e) => {
                    tracing::warn!(%kind, error = %e, "event delivery failed");
                }
            }
        });
    }
}

/// Gzip compress a serialized body.
fn gzip_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// In-memory sink for tests and the replay harness.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.lock().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<NotificationEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn kinds(&self) -> Vec<crate::events::EventKind> {
        self.lock().iter().map(|e| e.kind).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<NotificationEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl EventSink for RecordingSink {
    fn submit(&self, event: NotificationEvent) {
        self.lock().push(event);
    }
}

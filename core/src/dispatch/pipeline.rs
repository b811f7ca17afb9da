//! The event pipeline: one struct the host constructs at startup and feeds
//! from its client callback thread.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::aggregate::collect_all;
use crate::api::{ApiClient, http_client};
use crate::authz::{AuthzGate, GateState};
use crate::catalogue::{CollectionCatalogue, CombatTaskCatalogue};
use crate::client::{ClientSignal, GameView, SessionState};
use crate::delivery::{EventSink, WebhookSink};
use crate::events::{EventKind, NotificationEvent};
use crate::filters::FilterStore;
use crate::game_ids::{COMBAT_TASK_PAGE_COUNTERS, SETTLE_DELAY_TICKS};
use crate::notifiers::{Notifier, NotifierContext, default_notifiers};
use reval_types::{NotifierToggles, PipelineConfig};

/// Where the current session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    LoggedOut,
    /// Logged in; counters are still stale and the gate has not decided.
    AwaitingSettle { since_tick: u64 },
    Active,
    /// Gate exhausted its probe budget. Terminal until the next login.
    Denied,
}

pub struct EventPipeline {
    toggles: NotifierToggles,
    gate: AuthzGate,
    filters: Arc<FilterStore>,
    api: Arc<ApiClient>,
    sink: Arc<dyn EventSink>,
    notifiers: Vec<Box<dyn Notifier + Send>>,
    combat_tasks: CombatTaskCatalogue,
    collection: CollectionCatalogue,
    phase: SessionPhase,
    /// Monotonic across the whole process, never reset between sessions.
    tick: u64,
    /// Captured at construction; the host callback thread that later drives
    /// `handle_signal` has no ambient runtime to spawn network work on.
    runtime: Option<tokio::runtime::Handle>,
}

impl EventPipeline {
    /// Build the full pipeline with a gzip webhook sink. Call this where a
    /// tokio runtime is current, or filter refreshes and deliveries are
    /// skipped with a log line instead of sent.
    pub fn new(config: PipelineConfig) -> Self {
        let http = http_client();
        let sink: Arc<dyn EventSink> = Arc::new(WebhookSink::new(
            http.clone(),
            config.collector.webhook_url.clone(),
            config.collector.plugin_id.clone(),
        ));
        Self::assemble(config, http, sink)
    }

    /// Same wiring with a caller-supplied sink.
    pub fn with_sink(config: PipelineConfig, sink: Arc<dyn EventSink>) -> Self {
        Self::assemble(config, http_client(), sink)
    }

    fn assemble(config: PipelineConfig, http: reqwest::Client, sink: Arc<dyn EventSink>) -> Self {
        let PipelineConfig { collector, clan, toggles } = config;
        let filters = Arc::new(FilterStore::new(
            http.clone(),
            collector.filter_url,
            collector.plugin_id.clone(),
        ));
        let api = Arc::new(ApiClient::new(http, collector.api_base, collector.plugin_id));
        Self {
            toggles,
            gate: AuthzGate::new(clan),
            filters,
            api,
            sink,
            notifiers: default_notifiers(),
            combat_tasks: CombatTaskCatalogue::new(),
            collection: CollectionCatalogue::new(),
            phase: SessionPhase::LoggedOut,
            tick: 0,
            runtime: tokio::runtime::Handle::try_current().ok(),
        }
    }

    /// Shared reference client, for hosts that surface lookups in their UI.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn filters(&self) -> &Arc<FilterStore> {
        &self.filters
    }

    /// True once the session has settled and the clan gate has granted.
    pub fn active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn handle_signal(&mut self, view: &dyn GameView, signal: &ClientSignal) {
        self.handle_signal_at(view, signal, Utc::now());
    }

    /// Clock-injected variant of [`handle_signal`](Self::handle_signal);
    /// tests drive the gate's backoff schedule through it.
    pub fn handle_signal_at(
        &mut self,
        view: &dyn GameView,
        signal: &ClientSignal,
        now: DateTime<Utc>,
    ) {
        if matches!(signal, ClientSignal::Tick) {
            self.tick += 1;
        }

        match signal {
            ClientSignal::StateChanged { state } => self.on_state(view, *state, now),
            ClientSignal::SyncRequested => {
                if self.phase == SessionPhase::Active {
                    self.emit_snapshot(view, EventKind::Sync);
                }
            }
            _ => {}
        }

        self.advance_phase(view, now);

        if self.phase != SessionPhase::Active {
            return;
        }

        // Catalogues observe before the notifiers read them, so an obtained
        // item or a finished task is already counted when its event forms.
        self.collection.observe(signal, view);
        if let ClientSignal::CounterChanged { id, .. } = signal
            && COMBAT_TASK_PAGE_COUNTERS.contains(id)
        {
            self.combat_tasks.sync(view);
        }

        self.fan_out(view, signal);
    }

    fn on_state(&mut self, view: &dyn GameView, state: SessionState, now: DateTime<Utc>) {
        match state {
            SessionState::LoggedIn => {
                if self.phase != SessionPhase::LoggedOut {
                    return;
                }
                self.gate.arm(now);
                if let Some(handle) = &self.runtime {
                    self.filters.spawn_refresh(handle);
                } else {
                    tracing::debug!("no async runtime; keeping previous filter set");
                }
                self.phase = SessionPhase::AwaitingSettle { since_tick: self.tick };
                tracing::debug!(tick = self.tick, "login observed, awaiting settle");
            }
            // A hop keeps the session: the same account comes straight back.
            SessionState::Hopping => {}
            SessionState::LoginScreen => self.end_session(view),
        }
    }

    fn advance_phase(&mut self, view: &dyn GameView, now: DateTime<Utc>) {
        let SessionPhase::AwaitingSettle { since_tick } = self.phase else {
            return;
        };
        match self.gate.poll(view, now) {
            GateState::Denied => self.phase = SessionPhase::Denied,
            GateState::Granted if self.tick >= since_tick + SETTLE_DELAY_TICKS => {
                self.activate(view);
            }
            _ => {}
        }
    }

    fn activate(&mut self, view: &dyn GameView) {
        self.combat_tasks.build(view);
        self.collection.build(view);
        self.phase = SessionPhase::Active;
        tracing::info!(tick = self.tick, "session active");
        self.emit_snapshot(view, EventKind::Login);
    }

    /// Tear the session down. Emits the LOGOUT snapshot first while the
    /// view is still readable, then resets every per-session collaborator.
    fn end_session(&mut self, view: &dyn GameView) {
        if self.phase == SessionPhase::Active {
            self.emit_snapshot(view, EventKind::Logout);
        }
        if self.phase != SessionPhase::LoggedOut {
            tracing::debug!(tick = self.tick, "session ended");
        }
        self.phase = SessionPhase::LoggedOut;
        self.gate.disarm();
        for notifier in &mut self.notifiers {
            notifier.reset();
        }
        self.combat_tasks.reset();
        self.collection.reset();
        self.api.reset_session();
    }

    fn emit_snapshot(&self, view: &dyn GameView, kind: EventKind) {
        if !self.toggles.session_snapshots || !self.filters.current().kind_enabled(kind) {
            return;
        }
        let payload = collect_all(view, &self.combat_tasks, &self.collection);
        self.sink.submit(NotificationEvent::new(kind, payload));
    }

    fn fan_out(&mut self, view: &dyn GameView, signal: &ClientSignal) {
        let filters = self.filters.current();
        let ctx = NotifierContext {
            view,
            filters: filters.as_ref(),
            toggles: &self.toggles,
            combat_tasks: &self.combat_tasks,
            collection: &self.collection,
            tick: self.tick,
        };
        for notifier in &mut self.notifiers {
            if !notifier.enabled(&ctx) {
                continue;
            }
            if let Some(event) = notifier.handle_signal(signal, &ctx) {
                tracing::debug!(kind = %event.kind, "delivering event");
                self.sink.submit(event);
            }
        }
    }
}

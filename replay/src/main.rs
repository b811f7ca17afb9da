//! reval-replay - Replays a recorded signal script through the full pipeline.
//!
//! Reads a JSON-lines script where each line is either one client signal or
//! a patch to the stub view, drives the pipeline with it, and prints every
//! delivered event's wire body to stdout, one JSON object per line. Logs go
//! to stderr so the event stream stays clean for piping.
//!
//! Usage: reval-replay <script.jsonl> [config.json]
//!
//! Script lines:
//!   {"view": {"clanName": "Reval", "clanRank": 3}}
//!   {"signal": "state_changed", "state": "logged_in"}
//!   {"signal": "tick"}
//!   {"signal": "chat_line", "kind": "game", "text": "You have a funny feeling like you're being followed."}
//!
//! Blank lines and lines starting with `#` are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reval_core::client::{ClanMembership, StubItem, StubView};
use reval_core::delivery::EventSink;
use reval_core::{ClientSignal, EventPipeline, NotificationEvent};
use reval_types::PipelineConfig;
use serde::Deserialize;
use tracing_subscriber::filter::EnvFilter;

// ─────────────────────────────────────────────────────────────────────────────
// Script format
// ─────────────────────────────────────────────────────────────────────────────

/// One script line. Patches mutate the stub view and apply to every signal
/// that follows them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptLine {
    Patch { view: ViewPatch },
    Signal(ClientSignal),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ViewPatch {
    clan_name: Option<String>,
    clan_rank: Option<i32>,
    region: Option<u32>,
    weapon: Option<String>,
    music_track: Option<String>,
    combat_level: Option<u32>,
    counters: HashMap<u32, i32>,
    items: Vec<ItemPatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPatch {
    id: u32,
    name: String,
    #[serde(default)]
    market_value: u64,
    #[serde(default)]
    alch_value: u64,
    #[serde(default = "default_true")]
    tradeable: bool,
}

fn default_true() -> bool {
    true
}

impl ViewPatch {
    fn apply(self, view: &mut StubView) {
        if let Some(name) = self.clan_name {
            let rank =
                self.clan_rank.unwrap_or_else(|| view.clan.as_ref().map_or(0, |c| c.rank));
            view.clan = Some(ClanMembership { clan_name: name, rank });
        } else if let Some(rank) = self.clan_rank
            && let Some(clan) = view.clan.as_mut()
        {
            clan.rank = rank;
        }
        if let Some(region) = self.region {
            view.region = region;
        }
        if let Some(weapon) = self.weapon {
            view.weapon = Some(weapon);
        }
        if let Some(track) = self.music_track {
            view.music_track = Some(track);
        }
        if let Some(level) = self.combat_level {
            view.combat_level = level;
        }
        for (id, value) in self.counters {
            view.set_counter(id, value);
        }
        for item in self.items {
            view.items.insert(
                item.id,
                StubItem {
                    name: item.name,
                    market_value: item.market_value,
                    alch_value: item.alch_value,
                    tradeable: item.tradeable,
                },
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delivery
// ─────────────────────────────────────────────────────────────────────────────

/// Prints each event as a compact JSON line instead of posting it.
struct StdoutSink {
    delivered: AtomicUsize,
}

impl EventSink for StdoutSink {
    fn submit(&self, event: NotificationEvent) {
        println!("{}", event.wire_body());
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("REVAL_LOG_PATH")
        && let Ok(file) =
            std::fs::OpenOptions::new().create(true).append(true).open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Stdout carries the replayed events; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        tracing::error!("Usage: reval-replay <script.jsonl> [config.json]");
        std::process::exit(1);
    }
    let script_path = PathBuf::from(&args[1]);
    let config = match args.get(2) {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, path = %path, "failed to load config");
                std::process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    let file = match File::open(&script_path) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(error = %e, path = %script_path.display(), "cannot open script");
            std::process::exit(1);
        }
    };

    let sink = Arc::new(StdoutSink { delivered: AtomicUsize::new(0) });
    let mut pipeline = EventPipeline::with_sink(config, sink.clone());
    let mut view = StubView::logged_in();

    let mut signals = 0usize;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, line = index + 1, "script read failed");
                std::process::exit(1);
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<ScriptLine>(trimmed) {
            Ok(ScriptLine::Patch { view: patch }) => patch.apply(&mut view),
            Ok(ScriptLine::Signal(signal)) => {
                pipeline.handle_signal(&view, &signal);
                signals += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, line = index + 1, "skipping unparseable line");
            }
        }
    }

    tracing::info!(
        signals,
        events = sink.delivered.load(Ordering::Relaxed),
        active = pipeline.active(),
        "replay finished"
    );
}

//! Shared plain-data types for the Reval clan pipeline.
//!
//! Everything in this crate is serde-serializable configuration handed to the
//! pipeline by its host. No I/O, no async, no game logic.

pub mod config;

pub use config::{ClanPolicy, CollectorConfig, NotifierToggles, PipelineConfig};

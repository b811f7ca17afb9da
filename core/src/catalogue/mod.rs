//! Session-scoped reference catalogues.
//!
//! Built once per login by walking the host's struct/enum tables, then kept
//! current with cheap `sync` recomputes. These are not detectors: they hold
//! derived state the notifiers and the aggregator enrich from.

mod collection;
mod combat_tasks;

pub use collection::{CollectionCatalogue, ObtainedItem, obtained_line_item};
pub use combat_tasks::{CombatTask, CombatTaskCatalogue, task_completed};

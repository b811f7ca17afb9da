//! Combat achievement task catalogue.
//!
//! The host exposes one enum per tier listing task structs; completion state
//! is bit-packed across an ordered array of counter "pages", 32 tasks per
//! page. The catalogue materializes the flat task list once per session and
//! recomputes completion flags on demand.

use crate::client::GameView;
use crate::game_ids::{
    BITS_PER_PAGE, COMBAT_TASK_PAGE_COUNTERS, COMBAT_TASK_TIER_ENUMS, CombatTaskTier,
    PARAM_TASK_ID, PARAM_TASK_NAME,
};

/// Decode one task's completion bit out of the ordered page array.
pub fn task_completed(pages: &[i32], task_id: i64) -> bool {
    if task_id < 0 {
        return false;
    }
    let page = (task_id / BITS_PER_PAGE) as usize;
    let bit = task_id % BITS_PER_PAGE;
    pages.get(page).is_some_and(|value| (*value as i64 >> bit) & 1 == 1)
}

#[derive(Debug, Clone)]
pub struct CombatTask {
    pub id: i64,
    pub name: String,
    pub tier: CombatTaskTier,
    pub completed: bool,
}

#[derive(Debug, Default)]
pub struct CombatTaskCatalogue {
    tasks: Vec<CombatTask>,
    built: bool,
}

impl CombatTaskCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn tasks(&self) -> &[CombatTask] {
        &self.tasks
    }

    /// Walk the tier enums and materialize the task list. Tasks missing an id
    /// or name struct param are skipped; an empty walk leaves the catalogue
    /// unbuilt so a later sync retries.
    pub fn build(&mut self, view: &dyn GameView) {
        let pages = read_pages(view);
        let mut tasks = Vec::new();
        for &(tier, enum_id) in COMBAT_TASK_TIER_ENUMS {
            for (_, struct_id) in view.enum_entries(enum_id) {
                if struct_id < 0 {
                    continue;
                }
                let struct_id = struct_id as u32;
                let Some(id) = view.struct_int(struct_id, PARAM_TASK_ID) else {
                    continue;
                };
                let Some(name) = view.struct_text(struct_id, PARAM_TASK_NAME) else {
                    continue;
                };
                tasks.push(CombatTask { id, name, tier, completed: task_completed(&pages, id) });
            }
        }
        self.built = !tasks.is_empty();
        if self.built {
            tracing::debug!(count = tasks.len(), "combat task catalogue built");
        }
        self.tasks = tasks;
    }

    /// Recompute completion flags against live counters; rebuilds first if
    /// the reference tables were not readable at build time.
    pub fn sync(&mut self, view: &dyn GameView) {
        if !self.built {
            self.build(view);
            return;
        }
        let pages = read_pages(view);
        for task in &mut self.tasks {
            task.completed = task_completed(&pages, task.id);
        }
    }

    pub fn reset(&mut self) {
        self.tasks.clear();
        self.built = false;
    }

    /// `(completed, total)` within one tier.
    pub fn tier_counts(&self, tier: CombatTaskTier) -> (usize, usize) {
        let mut done = 0;
        let mut total = 0;
        for task in self.tasks.iter().filter(|t| t.tier == tier) {
            total += 1;
            if task.completed {
                done += 1;
            }
        }
        (done, total)
    }

    /// `(completed, total)` across all tiers.
    pub fn totals(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        (done, self.tasks.len())
    }
}

fn read_pages(view: &dyn GameView) -> Vec<i32> {
    COMBAT_TASK_PAGE_COUNTERS.iter().map(|&id| view.counter(id)).collect()
}

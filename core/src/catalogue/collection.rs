//! Collection log catalogue.
//!
//! The host's reference tables describe the log as tab structs pointing at
//! category structs pointing at item enums. The item taxonomy is immutable
//! once built; what the player actually owns is a session-scoped "obtained"
//! overlay fed by two capture points: opening a log page in the UI and the
//! "New item added" chat line.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::client::{ClientSignal, GameView};
use crate::game_ids::{
    ENUM_COLLECTION_TABS, PARAM_SECTION_CHILDREN, PARAM_SECTION_NAME, WIDGET_COLLECTION_LOG,
};

static OBTAINED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^New item added to your collection log: (?P<item>.+?)\.?$")
        .expect("obtained-line pattern is valid")
});

/// Item name from a collection-log chat line, if it is one.
pub fn obtained_line_item(text: &str) -> Option<&str> {
    OBTAINED_LINE.captures(text).map(|c| c.name("item").map_or("", |m| m.as_str().trim()))
}

#[derive(Debug, Clone)]
struct Category {
    tab: String,
    name: String,
    items: Vec<u32>,
}

/// Enrichment returned when an obtained item is recorded by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObtainedItem {
    pub item_id: u32,
    pub category: String,
    /// Obtained count across the whole log, this item included.
    pub obtained: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct CollectionCatalogue {
    categories: Vec<Category>,
    /// Item id -> owning category index; first category claiming an item wins.
    item_index: HashMap<u32, usize>,
    obtained: HashSet<u32>,
    built: bool,
}

impl CollectionCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn total_items(&self) -> usize {
        self.item_index.len()
    }

    pub fn obtained_count(&self) -> usize {
        self.obtained.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category_of(&self, item_id: u32) -> Option<&str> {
        self.item_index.get(&item_id).map(|&i| self.categories[i].name.as_str())
    }

    pub fn is_obtained(&self, item_id: u32) -> bool {
        self.obtained.contains(&item_id)
    }

    /// Walk tab -> category -> item tables into the immutable taxonomy. The
    /// obtained overlay survives a rebuild within the same session.
    pub fn build(&mut self, view: &dyn GameView) {
        let mut categories = Vec::new();
        let mut item_index = HashMap::new();
        for (_, tab_struct) in view.enum_entries(ENUM_COLLECTION_TABS) {
            if tab_struct < 0 {
                continue;
            }
            let tab_struct = tab_struct as u32;
            let Some(tab_name) = view.struct_text(tab_struct, PARAM_SECTION_NAME) else {
                continue;
            };
            let Some(category_enum) = view.struct_int(tab_struct, PARAM_SECTION_CHILDREN) else {
                continue;
            };
            for (_, category_struct) in view.enum_entries(category_enum as u32) {
                if category_struct < 0 {
                    continue;
                }
                let category_struct = category_struct as u32;
                let Some(name) = view.struct_text(category_struct, PARAM_SECTION_NAME) else {
                    continue;
                };
                let Some(item_enum) = view.struct_int(category_struct, PARAM_SECTION_CHILDREN)
                else {
                    continue;
                };
                let items: Vec<u32> = view
                    .enum_entries(item_enum as u32)
                    .into_iter()
                    .filter(|&(_, item)| item >= 0)
                    .map(|(_, item)| item as u32)
                    .collect();
                let index = categories.len();
                for &item in &items {
                    item_index.entry(item).or_insert(index);
                }
                categories.push(Category { tab: tab_name.clone(), name, items });
            }
        }
        self.built = !categories.is_empty();
        if self.built {
            tracing::debug!(
                categories = categories.len(),
                items = item_index.len(),
                "collection catalogue built"
            );
        }
        self.categories = categories;
        self.item_index = item_index;
    }

    /// Rebuild if the reference tables were unreadable at build time.
    pub fn sync(&mut self, view: &dyn GameView) {
        if !self.built {
            self.build(view);
        }
    }

    /// Clear the session overlay; the taxonomy is rebuilt on next login.
    pub fn reset(&mut self) {
        self.obtained.clear();
        self.categories.clear();
        self.item_index.clear();
        self.built = false;
    }

    /// Feed one host signal through the capture points: a collection-log
    /// page widget records every owned stack, the obtained chat line records
    /// its item. Runs before notifier fan-out so enrichment sees the update.
    pub fn observe(&mut self, signal: &ClientSignal, view: &dyn GameView) {
        match signal {
            ClientSignal::WidgetOpened { group, items, .. } if *group == WIDGET_COLLECTION_LOG => {
                for stack in items {
                    if stack.quantity > 0 && self.item_index.contains_key(&stack.item_id) {
                        self.obtained.insert(stack.item_id);
                    }
                }
            }
            ClientSignal::ChatLine { text, .. } => {
                if let Some(name) = obtained_line_item(text) {
                    self.record_obtained_by_name(view, name);
                }
            }
            _ => {}
        }
    }

    /// Record an item observed as obtained, resolving it by display name.
    /// Returns the enrichment for a COLLECTION event, or `None` when the name
    /// matches nothing in the taxonomy (catalogue not built, or a renamed
    /// item the tables do not know yet).
    pub fn record_obtained_by_name(
        &mut self,
        view: &dyn GameView,
        name: &str,
    ) -> Option<ObtainedItem> {
        let item_id = self.find_by_name(view, name)?;
        self.obtained.insert(item_id);
        Some(self.info(item_id))
    }

    /// Read-only variant of [`record_obtained_by_name`](Self::record_obtained_by_name),
    /// for callers running after the overlay has already been updated.
    pub fn lookup_obtained(&self, view: &dyn GameView, name: &str) -> Option<ObtainedItem> {
        self.find_by_name(view, name).map(|id| self.info(id))
    }

    fn find_by_name(&self, view: &dyn GameView, name: &str) -> Option<u32> {
        self.item_index.keys().copied().find(|&id| view.item_name(id).eq_ignore_ascii_case(name))
    }

    fn info(&self, item_id: u32) -> ObtainedItem {
        ObtainedItem {
            item_id,
            category: self.category_of(item_id).unwrap_or_default().to_string(),
            obtained: self.obtained.len(),
            total: self.total_items(),
        }
    }

    /// `(obtained, total)` per tab, for aggregation.
    pub fn tab_counts(&self) -> Vec<(String, usize, usize)> {
        let mut per_tab: Vec<(String, usize, usize)> = Vec::new();
        for category in &self.categories {
            let obtained = category.items.iter().filter(|i| self.obtained.contains(i)).count();
            match per_tab.iter_mut().find(|(tab, _, _)| *tab == category.tab) {
                Some((_, done, total)) => {
                    *done += obtained;
                    *total += category.items.len();
                }
                None => per_tab.push((category.tab.clone(), obtained, category.items.len())),
            }
        }
        per_tab
    }
}

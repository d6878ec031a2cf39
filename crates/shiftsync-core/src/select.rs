//! Opt-out selection over a generated change set.
//!
//! Every change id starts selected; the operator deselects what should not
//! be applied, then confirmation filters the buckets. Pure state
//! transformation, no I/O.

use std::collections::BTreeSet;

use crate::diff::ChangeSet;
use crate::model::change::ChangeItem;

/// Selection state over the change ids of one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl Selection {
    /// Build a selection over `changes` with every id selected.
    #[must_use]
    pub fn new(changes: &ChangeSet) -> Self {
        let ids: BTreeSet<String> = changes.iter().map(|item| item.id.clone()).collect();
        Self {
            selected: ids.clone(),
            ids,
        }
    }

    /// Flip one id. Unknown ids are ignored. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.ids.contains(id) {
            return false;
        }
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every known id.
    pub fn select_all(&mut self) {
        self.selected = self.ids.clone();
    }

    /// Deselect every id.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// True when `id` is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of currently selected ids.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Number of change ids under selection.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    /// Filter `changes` down to the selected subset, preserving bucket
    /// membership and order.
    #[must_use]
    pub fn confirm(&self, changes: &ChangeSet) -> ChangeSet {
        let keep = |items: &[ChangeItem]| {
            items
                .iter()
                .filter(|item| self.selected.contains(&item.id))
                .cloned()
                .collect()
        };
        ChangeSet {
            adds: keep(&changes.adds),
            updates: keep(&changes.updates),
            deletes: keep(&changes.deletes),
        }
    }
}

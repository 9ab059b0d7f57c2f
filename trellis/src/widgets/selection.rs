//! Selection state shared by the table and tree widgets.
//!
//! Selection tracks record keys rather than row indexes, so it survives
//! expansion changes and row reordering.

use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

/// Selection mode for row-bearing widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Single row selection.
    Single,
    /// Multiple rows can be selected (checkbox style).
    Multiple,
}

/// Key-based selection state.
///
/// Mutations return the keys that changed so the owning widget can notify
/// observers exactly once per call. Keys are not pruned when the record set
/// changes; the host clears stale selection explicitly.
#[derive(Debug, Clone)]
pub struct Selection<K> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash + Ord> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash + Ord> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    /// All selected keys, sorted for deterministic ordering.
    pub fn selected(&self) -> Vec<K> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Whether a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection. Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        self.selected.drain().collect()
    }

    /// Toggle selection of one key.
    /// Returns (added, removed) keys.
    pub fn toggle(&mut self, key: K) -> (Vec<K>, Vec<K>) {
        if self.selected.remove(&key) {
            (vec![], vec![key])
        } else {
            self.selected.insert(key.clone());
            (vec![key], vec![])
        }
    }

    /// Header-checkbox toggle over the given keys: if every one is already
    /// selected, deselect them; otherwise select the ones that are not.
    /// Returns (added, removed) keys.
    pub fn toggle_all(&mut self, keys: &[K]) -> (Vec<K>, Vec<K>) {
        if !keys.is_empty() && keys.iter().all(|key| self.selected.contains(key)) {
            let mut removed = Vec::with_capacity(keys.len());
            for key in keys {
                if self.selected.remove(key) {
                    removed.push(key.clone());
                }
            }
            (vec![], removed)
        } else {
            let mut added = Vec::new();
            for key in keys {
                if self.selected.insert(key.clone()) {
                    added.push(key.clone());
                }
            }
            (added, vec![])
        }
    }

    /// The selected records, resolved through the given key → record map,
    /// in sorted key order.
    ///
    /// A selected key missing from the map is skipped and logged, never an
    /// error; callers get a partial (possibly empty) collection.
    pub fn selected_from<'r, V>(&self, records: &'r HashMap<K, V>) -> Vec<&'r V> {
        let mut out = Vec::with_capacity(self.selected.len());
        let mut missing = 0usize;
        for key in self.selected() {
            match records.get(&key) {
                Some(record) => out.push(record),
                None => missing += 1,
            }
        }
        if missing > 0 {
            log::warn!("selection references {missing} record(s) no longer present; skipping");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection: Selection<u32> = Selection::new();
        assert_eq!(selection.toggle(7), (vec![7], vec![]));
        assert!(selection.is_selected(&7));
        assert_eq!(selection.toggle(7), (vec![], vec![7]));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_on_empty_input_is_noop() {
        let mut selection: Selection<u32> = Selection::new();
        assert_eq!(selection.toggle_all(&[]), (vec![], vec![]));
        assert!(selection.is_empty());
    }

    #[test]
    fn selected_is_sorted() {
        let mut selection: Selection<u32> = Selection::new();
        selection.toggle(9);
        selection.toggle(1);
        selection.toggle(5);
        assert_eq!(selection.selected(), vec![1, 5, 9]);
    }

    #[test]
    fn default_mode_is_none() {
        assert_eq!(SelectionMode::default(), SelectionMode::None);
    }
}

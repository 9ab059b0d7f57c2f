//! Expansion state shared by the table and tree widgets.

use std::collections::HashSet;
use std::hash::Hash;

/// Set of node keys currently open.
///
/// Pure state holder: mutations touch nothing but the set, and each reports
/// what changed so the owning widget can notify observers exactly once.
/// Keys from an earlier record set may linger after a swap; they resolve to
/// no node and are inert.
#[derive(Debug, Clone)]
pub struct Expansion<K> {
    open: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Expansion<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Expansion<K> {
    /// Create an empty expansion state (everything collapsed).
    pub fn new() -> Self {
        Self {
            open: HashSet::new(),
        }
    }

    /// Toggle a key. Returns whether the key is expanded afterwards.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.open.remove(&key) {
            false
        } else {
            self.open.insert(key);
            true
        }
    }

    /// Open every given key. Leaf keys are accepted and harmless.
    /// Returns the keys that were newly opened.
    pub fn expand_all<I>(&mut self, keys: I) -> Vec<K>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter()
            .filter(|key| self.open.insert(key.clone()))
            .collect()
    }

    /// Close everything. Returns the keys that were open.
    pub fn collapse_all(&mut self) -> Vec<K> {
        self.open.drain().collect()
    }

    /// Whether a key is open.
    pub fn is_expanded(&self, key: &K) -> bool {
        self.open.contains(key)
    }

    /// Number of open keys.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Whether everything is collapsed.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

//! Tree widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::ForestError;
use crate::forest::Forest;
use crate::record::RecordRow;
use crate::rows::{VisibleRow, flatten};
use crate::widgets::expansion::Expansion;

/// Unique identifier for a Tree widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_{}", self.0)
    }
}

/// Internal state for the Tree widget.
#[derive(Debug)]
struct TreeInner<T: RecordRow> {
    /// The flat record set, in input order.
    records: Vec<T>,
    /// Hierarchy built from the records.
    forest: Forest<T>,
    /// Expansion state (by key).
    expansion: Expansion<T::Key>,
    /// Flattened visible rows (rebuilt on record or expansion change).
    visible: Vec<VisibleRow<T>>,
}

impl<T: RecordRow> Default for TreeInner<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            forest: Forest::new(),
            expansion: Expansion::new(),
            visible: Vec::new(),
        }
    }
}

impl<T: RecordRow> TreeInner<T> {
    fn rebuild_visible(&mut self) {
        self.visible = flatten(&self.forest, &self.expansion);
    }
}

/// An expandable tree widget over parent-linked records.
///
/// Handles are cheap to clone and share the same state.
#[derive(Debug)]
pub struct Tree<T: RecordRow> {
    /// Unique identifier.
    id: TreeId,
    /// Internal state.
    inner: Arc<RwLock<TreeInner<T>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: RecordRow> Tree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            id: TreeId::new(),
            inner: Arc::new(RwLock::new(TreeInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a tree with an initial record set.
    pub fn with_records(records: Vec<T>) -> Result<Self, ForestError> {
        let tree = Self::new();
        tree.set_records(records)?;
        tree.clear_dirty();
        Ok(tree)
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    /// Replace the record set wholesale and rebuild the forest.
    ///
    /// Expansion keys survive the swap; ones that no longer resolve are
    /// inert.
    pub fn set_records(&self, records: Vec<T>) -> Result<(), ForestError> {
        let forest = Forest::build(&records)?;
        if let Ok(mut guard) = self.inner.write() {
            guard.records = records;
            guard.forest = forest;
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// All records, in input order.
    pub fn records(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.records.clone())
            .unwrap_or_default()
    }

    /// Whether the tree has no records.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.records.is_empty())
            .unwrap_or(true)
    }

    /// Whether any record is the parent of another.
    pub fn has_hierarchy(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.forest.has_hierarchy())
            .unwrap_or(false)
    }

    /// Find a record by key anywhere in the tree, collapsed subtrees
    /// included.
    pub fn find(&self, key: &T::Key) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.forest.find(key).map(|node| node.record().clone()))
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Toggle a node open or closed. Returns whether it is expanded
    /// afterwards.
    pub fn toggle_expand(&self, key: &T::Key) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let expanded = guard.expansion.toggle(key.clone());
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);
            expanded
        } else {
            false
        }
    }

    /// Open every node, leaves included.
    pub fn expand_all(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let keys = guard.forest.keys();
            guard.expansion.expand_all(keys);
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Close every node.
    pub fn collapse_all(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.expansion.collapse_all();
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Whether a node is expanded.
    pub fn is_expanded(&self, key: &T::Key) -> bool {
        self.inner
            .read()
            .map(|g| g.expansion.is_expanded(key))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Visible rows
    // -------------------------------------------------------------------------

    /// The flattened visible-row sequence, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow<T>> {
        self.inner
            .read()
            .map(|g| g.visible.clone())
            .unwrap_or_default()
    }

    /// A visible row by index.
    pub fn visible_row(&self, index: usize) -> Option<VisibleRow<T>> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.visible.get(index).cloned())
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.inner.read().map(|g| g.visible.len()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the tree has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst)
    }
}

impl<T: RecordRow> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: RecordRow> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

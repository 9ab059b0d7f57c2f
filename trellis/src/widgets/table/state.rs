//! Data table widget state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::columns::{ColumnLayout, ColumnSpec, ColumnView, PinSide};
use crate::context::{RowHandle, SelectionContext};
use crate::error::ForestError;
use crate::forest::Forest;
use crate::record::RecordRow;
use crate::rows::{VisibleRow, flatten};
use crate::widgets::expansion::Expansion;
use crate::widgets::selection::{Selection, SelectionMode};

use super::actions::{ContextHook, TableHooks};

/// Unique identifier for a DataTable widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Internal state for the DataTable widget.
#[derive(Debug)]
pub(super) struct TableInner<T: RecordRow> {
    /// The flat record set, in input order.
    pub records: Vec<T>,
    /// Hierarchy built from the records.
    pub forest: Forest<T>,
    /// Expansion state (by key).
    pub expansion: Expansion<T::Key>,
    /// Selection state (by key).
    pub selection: Selection<T::Key>,
    /// Selection mode.
    pub selection_mode: SelectionMode,
    /// Flattened visible rows (rebuilt on record or expansion change).
    pub visible: Vec<VisibleRow<T>>,
    /// Column layout state.
    pub columns: ColumnLayout<T>,
    /// Host callbacks.
    pub hooks: TableHooks<T>,
}

impl<T: RecordRow> TableInner<T> {
    fn new(columns: ColumnLayout<T>) -> Self {
        Self {
            records: Vec::new(),
            forest: Forest::new(),
            expansion: Expansion::new(),
            selection: Selection::new(),
            selection_mode: SelectionMode::None,
            visible: Vec::new(),
            columns,
            hooks: TableHooks::default(),
        }
    }

    fn rebuild_visible(&mut self) {
        self.visible = flatten(&self.forest, &self.expansion);
    }
}

/// A data table widget over hierarchical records.
///
/// `DataTable<T>` manages the row-state of a record table:
/// - Parent-linked records become a forest, rebuilt on every record swap
/// - Expand/collapse state per node, with a flattened visible-row plan
/// - Selection by record key, with a derived context pushed to the host
/// - Per-column width, pin side, and visibility
///
/// Handles are cheap to clone and share the same state.
#[derive(Debug)]
pub struct DataTable<T: RecordRow> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner<T>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T: RecordRow> DataTable<T> {
    /// Create an empty table with column configuration.
    pub fn new(columns: Vec<ColumnSpec<T>>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(ColumnLayout::new(columns)))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a table with an initial record set.
    pub fn with_records(columns: Vec<ColumnSpec<T>>, records: Vec<T>) -> Result<Self, ForestError> {
        let table = Self::new(columns);
        table.set_records(records)?;
        table.clear_dirty();
        Ok(table)
    }

    /// Enable multi-row selection. Prepends the reserved checkbox column.
    pub fn with_row_selection(self) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = SelectionMode::Multiple;
            let has_selection_column = guard
                .columns
                .specs()
                .first()
                .is_some_and(ColumnSpec::is_selection);
            if !has_selection_column {
                let specs = std::mem::take(&mut guard.columns).into_specs();
                guard.columns = ColumnLayout::with_selection_column(specs);
            }
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection_mode)
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    /// Replace the record set wholesale and rebuild the forest.
    ///
    /// A refreshed record set (a completed search, a reload) is always a
    /// full swap; the previous forest is never mutated in place. On a build
    /// error the previous state stays intact. Expansion keys that no longer
    /// resolve are kept and inert; selection is deliberately not pruned,
    /// call [`reset_selection`](Self::reset_selection) when the new set
    /// should start clean.
    pub fn set_records(&self, records: Vec<T>) -> Result<(), ForestError> {
        let forest = Forest::build(&records)?;
        if let Ok(mut guard) = self.inner.write() {
            log::debug!(
                "table {}: swapped in {} record(s), {} node(s)",
                self.id,
                records.len(),
                forest.node_count()
            );
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

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.inner.read().map(|g| g.records.len()).unwrap_or(0)
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Whether any record is the parent of another.
    ///
    /// Hosts use this to decide whether the expand-all gesture is worth
    /// offering at all.
    pub fn has_hierarchy(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.forest.has_hierarchy())
            .unwrap_or(false)
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

    /// Open every node in the forest, leaves included.
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

    /// Cell text for a visible row and column, through the column's
    /// renderer.
    pub fn cell_text(&self, row_index: usize, field: &str) -> Option<String> {
        self.inner.read().ok().and_then(|g| {
            let row = g.visible.get(row_index)?;
            let spec = g.columns.specs().iter().find(|s| s.field == field)?;
            Some(spec.cell_text(&row.record, row_index))
        })
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle selection of one visible row by key.
    ///
    /// Keys outside the current visible sequence are refused, so collapsed
    /// descendants cannot be selected blind. Returns (added, removed) keys.
    pub fn toggle_row(&self, key: &T::Key) -> (Vec<T::Key>, Vec<T::Key>) {
        let mut notification = None;
        let result = match self.inner.write() {
            Ok(mut guard) => {
                if guard.selection_mode == SelectionMode::None
                    || !guard.visible.iter().any(|row| row.key() == *key)
                {
                    (vec![], vec![])
                } else {
                    let result = guard.selection.toggle(key.clone());
                    self.dirty.store(true, Ordering::SeqCst);
                    notification = self.context_notification(&guard);
                    result
                }
            }
            Err(_) => (vec![], vec![]),
        };
        Self::notify(notification);
        result
    }

    /// Header-checkbox toggle over every visible row.
    /// Returns (added, removed) keys.
    pub fn toggle_all_visible(&self) -> (Vec<T::Key>, Vec<T::Key>) {
        let mut notification = None;
        let result = match self.inner.write() {
            Ok(mut guard) => {
                if guard.selection_mode == SelectionMode::None {
                    (vec![], vec![])
                } else {
                    let keys: Vec<_> = guard.visible.iter().map(VisibleRow::key).collect();
                    let result = guard.selection.toggle_all(&keys);
                    if !(result.0.is_empty() && result.1.is_empty()) {
                        self.dirty.store(true, Ordering::SeqCst);
                        notification = self.context_notification(&guard);
                    }
                    result
                }
            }
            Err(_) => (vec![], vec![]),
        };
        Self::notify(notification);
        result
    }

    /// Clear the selection. Returns the keys that were deselected.
    ///
    /// Hosts call this when swapping in an unrelated record set.
    pub fn reset_selection(&self) -> Vec<T::Key> {
        let mut notification = None;
        let removed = match self.inner.write() {
            Ok(mut guard) => {
                let removed = guard.selection.clear();
                if !removed.is_empty() {
                    self.dirty.store(true, Ordering::SeqCst);
                    notification = self.context_notification(&guard);
                }
                removed
            }
            Err(_) => Vec::new(),
        };
        Self::notify(notification);
        removed
    }

    /// All selected keys, sorted. Empty when nothing is selected.
    pub fn selected_keys(&self) -> Vec<T::Key> {
        self.inner
            .read()
            .map(|g| g.selection.selected())
            .unwrap_or_default()
    }

    /// The selected records, in key order. Keys that no longer resolve are
    /// skipped.
    pub fn selected_records(&self) -> Vec<T> {
        self.selection_context().selected_records
    }

    /// Whether a key is selected.
    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(key))
            .unwrap_or(false)
    }

    /// The current selection snapshot.
    pub fn selection_context(&self) -> SelectionContext<T> {
        self.inner
            .read()
            .map(|g| self.selection_context_inner(&g))
            .unwrap_or_default()
    }

    /// Build the selection snapshot from locked state.
    ///
    /// Selected keys missing from the record set degrade to a partial
    /// collection; the condition is logged, never raised.
    fn selection_context_inner(&self, guard: &TableInner<T>) -> SelectionContext<T> {
        let selected_keys = guard.selection.selected();

        let selected_rows = guard
            .visible
            .iter()
            .enumerate()
            .filter(|(_, row)| guard.selection.is_selected(&row.key()))
            .map(|(index, row)| RowHandle {
                index,
                key: row.key(),
            })
            .collect();

        let index: HashMap<T::Key, usize> = guard
            .records
            .iter()
            .enumerate()
            .map(|(slot, record)| (record.key(), slot))
            .collect();
        let mut selected_records = Vec::with_capacity(selected_keys.len());
        let mut missing = 0usize;
        for key in &selected_keys {
            match index.get(key) {
                Some(&slot) => selected_records.push(guard.records[slot].clone()),
                None => missing += 1,
            }
        }
        if missing > 0 {
            log::warn!(
                "table {}: {missing} selected record(s) are gone from the record set; skipping",
                self.id
            );
        }

        SelectionContext {
            selected_rows,
            selected_records,
            selected_keys,
        }
    }

    /// Capture the context hook and a fresh snapshot while locked; the call
    /// itself happens after the lock is released.
    pub(super) fn context_notification(
        &self,
        guard: &TableInner<T>,
    ) -> Option<(ContextHook<T>, SelectionContext<T>)> {
        let hook = guard.hooks.on_context.clone()?;
        Some((hook, self.selection_context_inner(guard)))
    }

    pub(super) fn notify(notification: Option<(ContextHook<T>, SelectionContext<T>)>) {
        if let Some((hook, context)) = notification {
            hook(&context);
        }
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Replace the column configuration wholesale. Widths and pins reset to
    /// the new configuration; the selection column is re-applied when row
    /// selection is enabled.
    pub fn set_columns(&self, columns: Vec<ColumnSpec<T>>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = if guard.selection_mode == SelectionMode::Multiple {
                ColumnLayout::with_selection_column(columns)
            } else {
                ColumnLayout::new(columns)
            };
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set a column's current width.
    pub fn set_column_width(&self, field: &str, px: u32) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let changed = guard.columns.set_width(field, px);
            if changed {
                self.dirty.store(true, Ordering::SeqCst);
            }
            changed
        } else {
            false
        }
    }

    /// Restore a column's configured width.
    pub fn reset_column_width(&self, field: &str) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let changed = guard.columns.reset_width(field);
            if changed {
                self.dirty.store(true, Ordering::SeqCst);
            }
            changed
        } else {
            false
        }
    }

    /// Pin a column to a side, or unpin it.
    pub fn pin_column(&self, field: &str, side: PinSide) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let changed = guard.columns.pin(field, side);
            if changed {
                self.dirty.store(true, Ordering::SeqCst);
            }
            changed
        } else {
            false
        }
    }

    /// Current pin side of a column.
    pub fn column_pin(&self, field: &str) -> PinSide {
        self.inner
            .read()
            .map(|g| g.columns.pin_side(field))
            .unwrap_or_default()
    }

    /// Sticky offset of a pinned column.
    pub fn column_offset(&self, field: &str) -> Option<u32> {
        self.inner.read().ok().and_then(|g| g.columns.offset(field))
    }

    /// Current width of a column.
    pub fn column_width(&self, field: &str) -> Option<u32> {
        self.inner.read().ok().and_then(|g| g.columns.width(field))
    }

    /// Whether a column is rendered.
    pub fn is_column_visible(&self, field: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.columns.is_visible(field))
            .unwrap_or(false)
    }

    /// Renderable snapshots of the visible columns.
    pub fn visible_columns(&self) -> Vec<ColumnView> {
        self.inner
            .read()
            .map(|g| g.columns.visible_columns())
            .unwrap_or_default()
    }

    /// Sum of the current widths of the visible columns.
    pub fn total_width(&self) -> u32 {
        self.inner.read().map(|g| g.columns.total_width()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: RecordRow> Clone for DataTable<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

//! Host callbacks and action dispatch for the DataTable widget.
//!
//! The surrounding widget (toolbar buttons, footer, search bar) triggers
//! these; the engine enforces the selection preconditions and hands back a
//! [`Notice`] when an action cannot proceed, leaving presentation to the
//! host.

use std::fmt;
use std::sync::Arc;

use crate::context::{Notice, SelectionContext};
use crate::record::RecordRow;
use crate::search::SearchArgs;

use super::state::DataTable;

/// Warning surfaced when a selection-dependent action is triggered with
/// nothing selected.
pub const EMPTY_SELECTION_WARNING: &str = "Please select at least 1 record";

pub(super) type CreateHook = Arc<dyn Fn() + Send + Sync>;
pub(super) type TargetsHook<T> = Arc<dyn Fn(&[<T as RecordRow>::Key]) + Send + Sync>;
pub(super) type RecordsHook<T> = Arc<dyn Fn(&[T]) + Send + Sync>;
pub(super) type SearchHook = Arc<dyn Fn(&SearchArgs) + Send + Sync>;
pub(super) type ContextHook<T> = Arc<dyn Fn(&SelectionContext<T>) + Send + Sync>;

/// Callbacks registered by the host.
pub(super) struct TableHooks<T: RecordRow> {
    pub on_create: Option<CreateHook>,
    pub on_delete: Option<TargetsHook<T>>,
    pub on_archive: Option<TargetsHook<T>>,
    pub on_activate: Option<TargetsHook<T>>,
    pub on_row_selection: Option<RecordsHook<T>>,
    pub on_search: Option<SearchHook>,
    pub on_context: Option<ContextHook<T>>,
}

impl<T: RecordRow> Default for TableHooks<T> {
    fn default() -> Self {
        Self {
            on_create: None,
            on_delete: None,
            on_archive: None,
            on_activate: None,
            on_row_selection: None,
            on_search: None,
            on_context: None,
        }
    }
}

impl<T: RecordRow> fmt::Debug for TableHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHooks")
            .field("on_create", &self.on_create.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_archive", &self.on_archive.is_some())
            .field("on_activate", &self.on_activate.is_some())
            .field("on_row_selection", &self.on_row_selection.is_some())
            .field("on_search", &self.on_search.is_some())
            .field("on_context", &self.on_context.is_some())
            .finish()
    }
}

impl<T: RecordRow> DataTable<T> {
    // -------------------------------------------------------------------------
    // Hook registration
    // -------------------------------------------------------------------------

    /// Register the create callback.
    pub fn on_create(self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_create = Some(Arc::new(f)));
        self
    }

    /// Register the delete callback, invoked with the selected keys.
    pub fn on_delete(self, f: impl Fn(&[T::Key]) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_delete = Some(Arc::new(f)));
        self
    }

    /// Register the archive callback, invoked with the selected keys.
    pub fn on_archive(self, f: impl Fn(&[T::Key]) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_archive = Some(Arc::new(f)));
        self
    }

    /// Register the activate callback, invoked with the selected keys.
    pub fn on_activate(self, f: impl Fn(&[T::Key]) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_activate = Some(Arc::new(f)));
        self
    }

    /// Register the row-selection submit callback, invoked with the
    /// selected records.
    pub fn on_row_selection(self, f: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_row_selection = Some(Arc::new(f)));
        self
    }

    /// Register the search callback.
    pub fn on_search(self, f: impl Fn(&SearchArgs) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_search = Some(Arc::new(f)));
        self
    }

    /// Register the context callback, invoked with a fresh
    /// [`SelectionContext`] after every selection change.
    pub fn on_context(self, f: impl Fn(&SelectionContext<T>) + Send + Sync + 'static) -> Self {
        self.set_hook(|hooks| hooks.on_context = Some(Arc::new(f)));
        self
    }

    fn set_hook(&self, install: impl FnOnce(&mut TableHooks<T>)) {
        if let Ok(mut guard) = self.inner.write() {
            install(&mut guard.hooks);
        }
    }

    // -------------------------------------------------------------------------
    // Action dispatch
    // -------------------------------------------------------------------------

    /// Dispatch the create gesture. No precondition.
    pub fn trigger_create(&self) {
        if let Some(hook) = self.hook(|hooks| hooks.on_create.clone()) {
            hook();
        }
    }

    /// Dispatch the delete gesture with the selected keys.
    ///
    /// With nothing selected the callback is not invoked and a warning
    /// notice is returned for the host to surface.
    pub fn trigger_delete(&self) -> Result<(), Notice> {
        self.dispatch_targets("delete", |hooks| hooks.on_delete.clone())
    }

    /// Dispatch the archive gesture with the selected keys. Same
    /// precondition as delete.
    pub fn trigger_archive(&self) -> Result<(), Notice> {
        self.dispatch_targets("archive", |hooks| hooks.on_archive.clone())
    }

    /// Dispatch the activate gesture with the selected keys. Same
    /// precondition as delete.
    pub fn trigger_activate(&self) -> Result<(), Notice> {
        self.dispatch_targets("activate", |hooks| hooks.on_activate.clone())
    }

    /// Submit the selected records through the row-selection callback.
    /// Same precondition as delete.
    pub fn submit_selection(&self) -> Result<(), Notice> {
        let records = self.selected_records();
        if records.is_empty() {
            log::warn!("table {}: row selection submitted with empty selection", self.id());
            return Err(Notice::warning(EMPTY_SELECTION_WARNING));
        }
        if let Some(hook) = self.hook(|hooks| hooks.on_row_selection.clone()) {
            hook(&records);
        }
        Ok(())
    }

    /// Dispatch a search. The result comes back as a fresh record set via
    /// [`set_records`](Self::set_records).
    pub fn trigger_search(&self, args: &SearchArgs) {
        if let Some(hook) = self.hook(|hooks| hooks.on_search.clone()) {
            hook(args);
        }
    }

    fn dispatch_targets(
        &self,
        action: &str,
        pick: impl FnOnce(&TableHooks<T>) -> Option<TargetsHook<T>>,
    ) -> Result<(), Notice> {
        let keys = self.selected_keys();
        if keys.is_empty() {
            log::warn!("table {}: {action} triggered with empty selection", self.id());
            return Err(Notice::warning(EMPTY_SELECTION_WARNING));
        }
        if let Some(hook) = self.hook(pick) {
            hook(&keys);
        }
        Ok(())
    }

    /// Clone a hook out of the lock so the call runs unlocked and may
    /// re-enter the table.
    fn hook<H>(&self, pick: impl FnOnce(&TableHooks<T>) -> Option<H>) -> Option<H> {
        self.inner.read().ok().and_then(|guard| pick(&guard.hooks))
    }
}

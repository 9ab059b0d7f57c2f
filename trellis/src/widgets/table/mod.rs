//! Data table widget state for hierarchical, selectable record sets.
//!
//! `DataTable<T>` combines the forest, expansion, selection, and column
//! layout into one observable state handle. The host feeds it records and
//! column configuration, registers callbacks for its surrounding widget,
//! and reads back the flattened visible rows, the column views, and the
//! selection context.
//!
//! # Example
//!
//! ```ignore
//! let table = DataTable::with_records(
//!     vec![
//!         ColumnSpec::new("name", "Name"),
//!         ColumnSpec::new("owner", "Owner").width(160),
//!     ],
//!     records,
//! )?
//! .with_row_selection()
//! .on_delete(|keys| backend.delete(keys));
//!
//! table.toggle_expand(&folder_key);
//! for row in table.visible_rows() {
//!     // paint row.record at row.indent(25)
//! }
//! ```

mod actions;
mod state;

pub use actions::EMPTY_SELECTION_WARNING;
pub use state::{DataTable, TableId};

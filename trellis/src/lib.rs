//! Row-state engine for record-backed table and tree widgets.
//!
//! `trellis` turns a flat collection of records linked by parent references
//! into a navigable forest, tracks which nodes are expanded and which rows
//! are selected, and computes a renderable column layout (pinning, resizing,
//! visibility). It is headless: a rendering layer observes the state and
//! paints it however it likes.
//!
//! The building blocks compose bottom-up:
//!
//! - [`forest::Forest`] builds the parent-linked node hierarchy
//! - [`widgets::expansion::Expansion`] tracks open nodes
//! - [`widgets::selection::Selection`] tracks selected rows
//! - [`columns::ColumnLayout`] tracks per-column width, pin side, visibility
//! - [`rows::flatten`] produces the linear visible-row sequence
//!
//! The [`widgets::DataTable`] and [`widgets::Tree`] facades wire these
//! together for a host and dispatch its callbacks.

pub mod columns;
pub mod context;
pub mod error;
pub mod forest;
pub mod record;
pub mod rows;
pub mod search;
pub mod widgets;

pub mod prelude {
    pub use crate::columns::{ColumnLayout, ColumnSpec, ColumnView, PinSide};
    pub use crate::context::{Notice, NoticeLevel, RowHandle, SelectionContext};
    pub use crate::error::ForestError;
    pub use crate::forest::{Forest, Node};
    pub use crate::record::{Key, Record, RecordRow, Value};
    pub use crate::rows::{VisibleRow, flatten};
    pub use crate::search::{SearchArgs, StorageState};
    pub use crate::widgets::expansion::Expansion;
    pub use crate::widgets::selection::{Selection, SelectionMode};
    pub use crate::widgets::table::EMPTY_SELECTION_WARNING;
    pub use crate::widgets::{DataTable, TableId, Tree, TreeId};
}

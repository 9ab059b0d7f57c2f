//! Tree widget state for hierarchical record sets.
//!
//! `Tree<T>` is the lighter sibling of the data table: forest plus
//! expansion, no columns, no selection. The host feeds it parent-linked
//! records and paints the flattened visible rows at `depth × unit`
//! indentation.
//!
//! # Example
//!
//! ```ignore
//! let tree = Tree::with_records(folders)?;
//! tree.toggle_expand(&root_key);
//! for row in tree.visible_rows() {
//!     // paint row.record at row.indent(20)
//! }
//! ```

mod state;

pub use state::{Tree, TreeId};

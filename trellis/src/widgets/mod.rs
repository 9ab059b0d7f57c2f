//! Widget facades and the state stores they share.

pub mod expansion;
pub mod selection;
pub mod table;
pub mod tree;

pub use table::{DataTable, TableId};
pub use tree::{Tree, TreeId};

//! Flattening a forest into the linear visible-row sequence.

use crate::forest::{Forest, Node};
use crate::record::RecordRow;
use crate::widgets::expansion::Expansion;

/// A visible row in the flattened render plan.
#[derive(Debug, Clone)]
pub struct VisibleRow<T: RecordRow> {
    /// The record itself.
    pub record: T,
    /// Depth in the hierarchy (0 = root).
    pub depth: u16,
    /// Whether the node has children.
    pub has_children: bool,
    /// Whether the node is currently expanded.
    pub is_expanded: bool,
}

impl<T: RecordRow> VisibleRow<T> {
    /// Identity of the row's record.
    pub fn key(&self) -> T::Key {
        self.record.key()
    }

    /// Indentation for a consumer using a fixed per-level unit.
    pub fn indent(&self, unit: u32) -> u32 {
        u32::from(self.depth) * unit
    }
}

/// Compute the ordered visible-row sequence for a forest.
///
/// Pre-order traversal over roots in forest order; children are visited only
/// under an expanded node. A node below a collapsed ancestor is never
/// emitted, whatever its own expansion state says. Depth starts at 0 for
/// roots and grows by one per descent.
pub fn flatten<T: RecordRow>(forest: &Forest<T>, expansion: &Expansion<T::Key>) -> Vec<VisibleRow<T>> {
    let mut out = Vec::new();
    collect(forest.roots(), expansion, 0, &mut out);
    out
}

fn collect<T: RecordRow>(
    nodes: &[Node<T>],
    expansion: &Expansion<T::Key>,
    depth: u16,
    out: &mut Vec<VisibleRow<T>>,
) {
    for node in nodes {
        let key = node.key();
        let has_children = node.has_children();
        let is_expanded = expansion.is_expanded(&key);

        out.push(VisibleRow {
            record: node.record().clone(),
            depth,
            has_children,
            is_expanded,
        });

        if is_expanded && has_children {
            collect(node.children(), expansion, depth + 1, out);
        }
    }
}

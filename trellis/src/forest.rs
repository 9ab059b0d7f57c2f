//! Forest construction from flat, parent-linked record sets.

use std::collections::HashMap;

use crate::error::ForestError;
use crate::record::RecordRow;

/// One record plus its ordered children within the forest.
#[derive(Debug, Clone)]
pub struct Node<T: RecordRow> {
    record: T,
    children: Vec<Node<T>>,
}

impl<T: RecordRow> Node<T> {
    /// The wrapped record.
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Identity of the wrapped record.
    pub fn key(&self) -> T::Key {
        self.record.key()
    }

    /// Child nodes, in input order of their records.
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Whether this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Ordered roots of the record hierarchy.
///
/// Built from a flat record sequence in two linear passes: first a
/// key → record lookup, then attachment in input order. A record whose
/// parent reference is absent or does not resolve becomes a root. Children
/// keep the relative order of their records in the input; no sorting is
/// applied.
///
/// Duplicate keys follow last-write-wins: every occurrence of a duplicated
/// key attaches the last record carrying it, and the earlier records become
/// unreachable. Parent-reference cycles are rejected with
/// [`ForestError::ParentCycle`].
#[derive(Debug, Clone)]
pub struct Forest<T: RecordRow> {
    roots: Vec<Node<T>>,
}

impl<T: RecordRow> Default for Forest<T> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<T: RecordRow> Forest<T> {
    /// An empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest using each record's own [`parent_key`](RecordRow::parent_key).
    pub fn build(records: &[T]) -> Result<Self, ForestError> {
        Self::build_with(records, T::parent_key)
    }

    /// Build a forest with a custom parent resolver.
    ///
    /// Useful when the parent reference lives in a non-default field of a
    /// dynamic record, or is derived rather than stored.
    pub fn build_with<F>(records: &[T], parent_of: F) -> Result<Self, ForestError>
    where
        F: Fn(&T) -> Option<T::Key>,
    {
        if records.is_empty() {
            return Ok(Self::new());
        }

        // Pass 1: key → slot lookup. Last write wins on duplicate keys.
        let mut lookup: HashMap<T::Key, usize> = HashMap::with_capacity(records.len());
        for (slot, record) in records.iter().enumerate() {
            lookup.insert(record.key(), slot);
        }

        // Pass 2: attach every record occurrence in input order. Attachment
        // always targets the looked-up slot, so a duplicated key resolves to
        // the last record carrying it.
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
        let mut root_slots: Vec<usize> = Vec::new();
        for record in records {
            let slot = lookup[&record.key()];
            match parent_of(record).and_then(|parent| lookup.get(&parent).copied()) {
                Some(parent_slot) => children[parent_slot].push(slot),
                None => root_slots.push(slot),
            }
        }

        if let Some(slot) = find_cycle(records, &lookup, &root_slots, &children) {
            return Err(ForestError::ParentCycle {
                key: format!("{:?}", records[slot].key()),
            });
        }

        let roots = root_slots
            .iter()
            .map(|&slot| materialize(records, &children, slot))
            .collect();
        Ok(Self { roots })
    }

    /// Root nodes in input order.
    pub fn roots(&self) -> &[Node<T>] {
        &self.roots
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count, descendants included.
    pub fn node_count(&self) -> usize {
        fn count<T: RecordRow>(nodes: &[Node<T>]) -> usize {
            nodes.len() + nodes.iter().map(|n| count(n.children())).sum::<usize>()
        }
        count(&self.roots)
    }

    /// Whether any node has children.
    pub fn has_hierarchy(&self) -> bool {
        self.roots.iter().any(Node::has_children)
    }

    /// Every node key in pre-order, leaves included.
    pub fn keys(&self) -> Vec<T::Key> {
        fn walk<T: RecordRow>(nodes: &[Node<T>], out: &mut Vec<T::Key>) {
            for node in nodes {
                out.push(node.key());
                walk(node.children(), out);
            }
        }
        let mut out = Vec::with_capacity(self.roots.len());
        walk(&self.roots, &mut out);
        out
    }

    /// Find a node by key anywhere in the forest, collapsed subtrees included.
    pub fn find(&self, key: &T::Key) -> Option<&Node<T>> {
        fn walk<'a, T: RecordRow>(nodes: &'a [Node<T>], key: &T::Key) -> Option<&'a Node<T>> {
            for node in nodes {
                if node.key() == *key {
                    return Some(node);
                }
                if let Some(found) = walk(node.children(), key) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, key)
    }
}

fn materialize<T: RecordRow>(records: &[T], children: &[Vec<usize>], slot: usize) -> Node<T> {
    Node {
        record: records[slot].clone(),
        children: children[slot]
            .iter()
            .map(|&child| materialize(records, children, child))
            .collect(),
    }
}

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

/// Depth-first coloring over the attachment graph. Returns the slot of a
/// record inside a cycle, or `None` if materialization is safe.
///
/// Two failure shapes exist: a node reachable from a root whose subtree
/// loops back onto the traversal path, and a cycle detached from every root
/// (its members are never attached under a root at all).
fn find_cycle<T: RecordRow>(
    records: &[T],
    lookup: &HashMap<T::Key, usize>,
    roots: &[usize],
    children: &[Vec<usize>],
) -> Option<usize> {
    let mut color = vec![WHITE; records.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for &root in roots {
        if color[root] != WHITE {
            continue;
        }
        color[root] = GRAY;
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let (slot, next) = *frame;
            if let Some(&child) = children[slot].get(next) {
                frame.1 += 1;
                match color[child] {
                    WHITE => {
                        color[child] = GRAY;
                        stack.push((child, 0));
                    }
                    GRAY => return Some(child),
                    _ => {}
                }
            } else {
                color[slot] = BLACK;
                stack.pop();
            }
        }
    }

    // A slot that still owns its key but was never reached sits in a
    // detached cycle. Shadowed duplicate slots are legitimately unreached.
    records
        .iter()
        .enumerate()
        .find_map(|(slot, record)| {
            (lookup[&record.key()] == slot && color[slot] == WHITE).then_some(slot)
        })
}

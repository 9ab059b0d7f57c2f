use trellis::record::RecordRow;
use trellis::widgets::Tree;

#[derive(Debug, Clone, PartialEq)]
struct Folder {
    id: i64,
    parent: Option<i64>,
    name: &'static str,
}

impl RecordRow for Folder {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn parent_key(&self) -> Option<i64> {
        self.parent
    }

    fn field_text(&self, field: &str) -> Option<String> {
        (field == "name").then(|| self.name.to_string())
    }
}

fn folder(id: i64, parent: Option<i64>, name: &'static str) -> Folder {
    Folder { id, parent, name }
}

fn sample() -> Vec<Folder> {
    vec![
        folder(1, None, "inbox"),
        folder(2, Some(1), "reports"),
        folder(3, Some(2), "archive"),
        folder(4, None, "drafts"),
    ]
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_collapsed_tree_shows_roots() {
    let tree = Tree::with_records(sample()).unwrap();
    let keys: Vec<_> = tree.visible_rows().iter().map(|r| r.key()).collect();
    assert_eq!(keys, vec![1, 4]);
}

#[test]
fn test_toggle_expand_reveals_one_level() {
    let tree = Tree::with_records(sample()).unwrap();
    assert!(tree.toggle_expand(&1));

    let rows: Vec<_> = tree.visible_rows().iter().map(|r| (r.key(), r.depth)).collect();
    assert_eq!(rows, vec![(1, 0), (2, 1), (4, 0)]);
}

#[test]
fn test_expand_all_opens_every_node_including_leaves() {
    let tree = Tree::with_records(sample()).unwrap();
    tree.expand_all();

    let rows: Vec<_> = tree.visible_rows().iter().map(|r| (r.key(), r.depth)).collect();
    assert_eq!(rows, vec![(1, 0), (2, 1), (3, 2), (4, 0)]);

    // Leaf nodes are opened too.
    assert!(tree.is_expanded(&3));
    assert!(tree.is_expanded(&4));
}

#[test]
fn test_collapse_all_returns_to_roots() {
    let tree = Tree::with_records(sample()).unwrap();
    tree.expand_all();
    tree.collapse_all();

    assert_eq!(tree.visible_len(), 2);
    assert!(!tree.is_expanded(&1));
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_find_reaches_collapsed_nodes() {
    let tree = Tree::with_records(sample()).unwrap();
    assert_eq!(tree.find(&3).map(|f| f.name), Some("archive"));
    assert!(tree.find(&99).is_none());
}

#[test]
fn test_set_records_keeps_expansion_state() {
    let tree = Tree::with_records(sample()).unwrap();
    tree.toggle_expand(&1);

    // Same key reappears in the new set: it stays open.
    tree.set_records(vec![folder(1, None, "inbox"), folder(5, Some(1), "new")])
        .unwrap();
    let keys: Vec<_> = tree.visible_rows().iter().map(|r| r.key()).collect();
    assert_eq!(keys, vec![1, 5]);
}

#[test]
fn test_empty_tree() {
    let tree: Tree<Folder> = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.visible_len(), 0);
    assert!(!tree.has_hierarchy());
}

// ============================================================================
// Dirty tracking
// ============================================================================

#[test]
fn test_dirty_flag_across_handles() {
    let tree = Tree::with_records(sample()).unwrap();
    assert!(!tree.is_dirty());

    let handle = tree.clone();
    handle.toggle_expand(&1);
    assert!(tree.is_dirty());

    tree.clear_dirty();
    assert!(!handle.is_dirty());
}

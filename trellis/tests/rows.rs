use trellis::forest::Forest;
use trellis::record::RecordRow;
use trellis::rows::flatten;
use trellis::widgets::expansion::Expansion;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: i64,
    parent: Option<i64>,
}

impl RecordRow for Item {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn parent_key(&self) -> Option<i64> {
        self.parent
    }
}

fn item(id: i64, parent: Option<i64>) -> Item {
    Item { id, parent }
}

fn keys_and_depths(rows: &[trellis::rows::VisibleRow<Item>]) -> Vec<(i64, u16)> {
    rows.iter().map(|row| (row.key(), row.depth)).collect()
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_collapsed_forest_shows_roots_only() {
    let forest = Forest::build(&[item(1, None), item(2, Some(1)), item(3, Some(1))]).unwrap();
    let expansion = Expansion::new();

    let rows = flatten(&forest, &expansion);
    assert_eq!(keys_and_depths(&rows), vec![(1, 0)]);
}

#[test]
fn test_toggle_reveals_children() {
    let forest = Forest::build(&[item(1, None), item(2, Some(1)), item(3, Some(1))]).unwrap();
    let mut expansion = Expansion::new();
    expansion.toggle(1);

    let rows = flatten(&forest, &expansion);
    assert_eq!(keys_and_depths(&rows), vec![(1, 0), (2, 1), (3, 1)]);
}

#[test]
fn test_collapsed_ancestor_hides_expanded_descendants() {
    // Node 2 is expanded, but its parent is not: nothing below 1 shows.
    let forest = Forest::build(&[item(1, None), item(2, Some(1)), item(3, Some(2))]).unwrap();
    let mut expansion = Expansion::new();
    expansion.toggle(2);

    let rows = flatten(&forest, &expansion);
    assert_eq!(keys_and_depths(&rows), vec![(1, 0)]);
}

#[test]
fn test_depth_increments_per_level() {
    let forest = Forest::build(&[item(1, None), item(2, Some(1)), item(3, Some(2))]).unwrap();
    let mut expansion = Expansion::new();
    expansion.toggle(1);
    expansion.toggle(2);

    let rows = flatten(&forest, &expansion);
    assert_eq!(keys_and_depths(&rows), vec![(1, 0), (2, 1), (3, 2)]);
}

#[test]
fn test_roots_keep_forest_order() {
    let forest = Forest::build(&[item(5, None), item(1, None), item(3, None)]).unwrap();
    let rows = flatten(&forest, &Expansion::new());
    assert_eq!(keys_and_depths(&rows), vec![(5, 0), (1, 0), (3, 0)]);
}

#[test]
fn test_row_flags() {
    let forest = Forest::build(&[item(1, None), item(2, Some(1))]).unwrap();
    let mut expansion = Expansion::new();
    expansion.toggle(1);

    let rows = flatten(&forest, &expansion);
    assert!(rows[0].has_children);
    assert!(rows[0].is_expanded);
    assert!(!rows[1].has_children);
    assert!(!rows[1].is_expanded);
}

#[test]
fn test_indent_multiplies_depth_by_unit() {
    let forest = Forest::build(&[item(1, None), item(2, Some(1))]).unwrap();
    let mut expansion = Expansion::new();
    expansion.toggle(1);

    let rows = flatten(&forest, &expansion);
    assert_eq!(rows[0].indent(25), 0);
    assert_eq!(rows[1].indent(25), 25);
}

// ============================================================================
// Expansion store
// ============================================================================

#[test]
fn test_toggle_twice_restores_membership() {
    let mut expansion: Expansion<i64> = Expansion::new();
    assert!(expansion.toggle(1));
    assert!(!expansion.toggle(1));
    assert!(!expansion.is_expanded(&1));
    assert!(expansion.is_empty());
}

#[test]
fn test_expand_all_accepts_leaf_keys() {
    let mut expansion: Expansion<i64> = Expansion::new();
    let added = expansion.expand_all(vec![1, 2, 3]);
    assert_eq!(added.len(), 3);
    // Leaf keys open harmlessly; flattening just never descends into them.
    assert!(expansion.is_expanded(&3));
}

#[test]
fn test_expand_all_reports_only_new_keys() {
    let mut expansion: Expansion<i64> = Expansion::new();
    expansion.toggle(2);
    let added = expansion.expand_all(vec![1, 2, 3]);
    assert_eq!(added, vec![1, 3]);
}

#[test]
fn test_collapse_all_clears() {
    let mut expansion: Expansion<i64> = Expansion::new();
    expansion.expand_all(vec![1, 2, 3]);
    let mut removed = expansion.collapse_all();
    removed.sort_unstable();
    assert_eq!(removed, vec![1, 2, 3]);
    assert!(expansion.is_empty());
    assert_eq!(expansion.open_count(), 0);
}

#[test]
fn test_stale_keys_are_inert() {
    // Keys from a previous record set stay in the store but match nothing.
    let mut expansion = Expansion::new();
    expansion.toggle(99);

    let forest = Forest::build(&[item(1, None), item(2, Some(1))]).unwrap();
    let rows = flatten(&forest, &expansion);
    assert_eq!(keys_and_depths(&rows), vec![(1, 0)]);
}

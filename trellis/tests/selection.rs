use std::collections::HashMap;

use trellis::widgets::selection::Selection;

fn logger() {
    let _ = simplelog::SimpleLogger::init(
        simplelog::LevelFilter::Warn,
        simplelog::Config::default(),
    );
}

// ============================================================================
// Toggle semantics
// ============================================================================

#[test]
fn test_toggle_all_then_toggle_one_leaves_rest() {
    let mut selection: Selection<i64> = Selection::new();
    let keys = vec![1, 2, 3, 4];

    selection.toggle_all(&keys);
    selection.toggle(2);

    assert_eq!(selection.selected(), vec![1, 3, 4]);
}

#[test]
fn test_selected_with_no_selection_is_empty_vec() {
    let selection: Selection<i64> = Selection::new();
    assert!(selection.selected().is_empty());
    assert_eq!(selection.len(), 0);
}

#[test]
fn test_toggle_all_deselects_when_everything_selected() {
    let mut selection: Selection<i64> = Selection::new();
    let keys = vec![1, 2, 3];

    let (added, removed) = selection.toggle_all(&keys);
    assert_eq!(added.len(), 3);
    assert!(removed.is_empty());

    let (added, removed) = selection.toggle_all(&keys);
    assert!(added.is_empty());
    assert_eq!(removed.len(), 3);
    assert!(selection.is_empty());
}

#[test]
fn test_toggle_all_completes_partial_selection() {
    let mut selection: Selection<i64> = Selection::new();
    selection.toggle(2);

    let (added, removed) = selection.toggle_all(&[1, 2, 3]);
    assert_eq!(added, vec![1, 3]);
    assert!(removed.is_empty());
    assert_eq!(selection.selected(), vec![1, 2, 3]);
}

#[test]
fn test_clear_returns_deselected_keys() {
    let mut selection: Selection<i64> = Selection::new();
    selection.toggle_all(&[1, 2]);

    let mut removed = selection.clear();
    removed.sort_unstable();
    assert_eq!(removed, vec![1, 2]);
    assert!(selection.is_empty());
}

#[test]
fn test_selected_is_sorted_regardless_of_toggle_order() {
    let mut selection: Selection<String> = Selection::new();
    selection.toggle("banana".to_string());
    selection.toggle("apple".to_string());
    selection.toggle("cherry".to_string());

    assert_eq!(selection.selected(), vec!["apple", "banana", "cherry"]);
}

// ============================================================================
// Record derivation
// ============================================================================

#[test]
fn test_selected_from_resolves_records() {
    let mut selection: Selection<i64> = Selection::new();
    selection.toggle_all(&[2, 1]);

    let records: HashMap<i64, &str> = HashMap::from([(1, "one"), (2, "two"), (3, "three")]);
    let resolved = selection.selected_from(&records);
    assert_eq!(resolved, vec![&"one", &"two"]);
}

#[test]
fn test_selected_from_skips_missing_keys() {
    logger();
    let mut selection: Selection<i64> = Selection::new();
    selection.toggle_all(&[1, 2, 99]);

    let records: HashMap<i64, &str> = HashMap::from([(1, "one"), (2, "two")]);
    // Degrades to a partial collection; never an error.
    let resolved = selection.selected_from(&records);
    assert_eq!(resolved, vec![&"one", &"two"]);
}

#[test]
fn test_selected_from_with_nothing_resolvable_is_empty() {
    logger();
    let mut selection: Selection<i64> = Selection::new();
    selection.toggle(42);

    let records: HashMap<i64, &str> = HashMap::new();
    assert!(selection.selected_from(&records).is_empty());
}

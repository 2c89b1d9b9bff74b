//! Integration tests for the binary tree engine.
//!
//! Trees are built through path insertion only, the way callers build them.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use treekit::domain::{BinaryPath, BinaryTree, DomainError, Scalar};
use treekit::util::testing;

/// root=10, L=5, R=15, LL=3, LR=7
#[fixture]
fn five() -> BinaryTree<i64> {
    testing::init_test_setup();
    let mut tree = BinaryTree::with_root(10);
    for (path, value) in [("L", 5), ("R", 15), ("LL", 3), ("LR", 7)] {
        tree.insert_by_path_str(path, value).unwrap();
    }
    tree
}

/// Ordered tree holding {3, 5, 7, 10, 12, 15, 18}.
#[fixture]
fn ordered() -> BinaryTree<i64> {
    let mut tree = BinaryTree::with_root(10);
    for (path, value) in [
        ("L", 5),
        ("R", 15),
        ("LL", 3),
        ("LR", 7),
        ("RL", 12),
        ("RR", 18),
    ] {
        tree.insert_by_path_str(path, value).unwrap();
    }
    tree
}

fn value_at(tree: &BinaryTree<i64>, path: &str) -> Option<i64> {
    let path: BinaryPath = path.parse().unwrap();
    tree.node_at(&path).map(|node| node.value)
}

// ============================================================
// insert_by_path
// ============================================================

#[rstest]
fn given_existing_prefix_when_insert_then_walk_reaches_value(five: BinaryTree<i64>) {
    assert_eq!(value_at(&five, "L"), Some(5));
    assert_eq!(value_at(&five, "R"), Some(15));
    assert_eq!(value_at(&five, "LL"), Some(3));
    assert_eq!(value_at(&five, "LR"), Some(7));
    assert_eq!(five.len(), 5);
}

#[rstest]
#[case("RLL", DomainError::BrokenPath { position: 1 })]
#[case("LLLL", DomainError::BrokenPath { position: 2 })]
#[case("", DomainError::EmptyPath)]
#[case("LX", DomainError::InvalidDirection { token: 'X', position: 1 })]
#[case("l", DomainError::InvalidDirection { token: 'l', position: 0 })]
fn given_bad_path_when_insert_then_fails_without_mutation(
    mut five: BinaryTree<i64>,
    #[case] path: &str,
    #[case] expected: DomainError,
) {
    let before = five.clone();

    let err = five.insert_by_path_str(path, 99).unwrap_err();

    assert_eq!(err, expected);
    assert_eq!(five, before);
}

#[rstest]
fn given_empty_tree_when_insert_then_empty_tree_error() {
    let mut tree: BinaryTree<i64> = BinaryTree::new();
    assert_eq!(
        tree.insert_by_path_str("L", 1),
        Err(DomainError::EmptyTree)
    );
    assert!(tree.is_empty());
}

/// Overwrite is the insertion policy: the occupied slot and its subtree are replaced.
#[rstest]
fn given_occupied_slot_when_insert_then_subtree_is_replaced(mut five: BinaryTree<i64>) {
    five.insert_by_path_str("L", 6).unwrap();

    assert_eq!(value_at(&five, "L"), Some(6));
    assert_eq!(value_at(&five, "LL"), None);
    assert_eq!(value_at(&five, "LR"), None);
    assert_eq!(five.len(), 3);
}

// ============================================================
// delete_by_value
// ============================================================

#[rstest]
fn given_node_with_two_children_when_delete_then_successor_takes_its_place(
    mut five: BinaryTree<i64>,
) {
    assert!(five.delete_by_value(&5));

    assert!(five.find(&5).is_none());
    assert_eq!(value_at(&five, "L"), Some(7));
    assert_eq!(value_at(&five, "LL"), Some(3));
    assert_eq!(value_at(&five, "LR"), None);
    assert_eq!(five.in_order().copied().collect::<Vec<_>>(), vec![3, 7, 10, 15]);
}

#[rstest]
fn given_root_with_two_children_when_delete_then_right_minimum_is_moved_once() {
    let mut tree = BinaryTree::with_root(10);
    for (path, value) in [("L", 5), ("R", 15), ("RL", 12), ("RR", 18), ("RLL", 11)] {
        tree.insert_by_path_str(path, value).unwrap();
    }

    assert!(tree.delete_by_value(&10));

    assert_eq!(tree.root().unwrap().value, 11);
    assert_eq!(value_at(&tree, "RL"), Some(12));
    assert_eq!(value_at(&tree, "RLL"), None);
    assert_eq!(tree.pre_order().filter(|n| n.value == 11).count(), 1);
    assert_eq!(tree.len(), 5);
}

#[rstest]
fn given_successor_equal_to_target_when_delete_then_only_one_copy_goes() {
    let mut tree = BinaryTree::with_root(10);
    tree.insert_by_path_str("L", 5).unwrap();
    tree.insert_by_path_str("R", 10).unwrap();

    assert!(tree.delete_by_value(&10));

    assert_eq!(tree.root().unwrap().value, 10);
    assert_eq!(value_at(&tree, "L"), Some(5));
    assert_eq!(value_at(&tree, "R"), None);
    assert_eq!(tree.len(), 2);
}

#[rstest]
#[case(3, vec![5, 7, 10, 15])]
#[case(15, vec![3, 5, 7, 10])]
fn given_leaf_when_delete_then_parent_link_is_cleared(
    mut five: BinaryTree<i64>,
    #[case] target: i64,
    #[case] expected: Vec<i64>,
) {
    assert!(five.delete_by_value(&target));
    assert_eq!(five.in_order().copied().collect::<Vec<_>>(), expected);
}

#[rstest]
fn given_node_with_one_child_when_delete_then_child_is_promoted() {
    let mut tree = BinaryTree::with_root(10);
    tree.insert_by_path_str("L", 5).unwrap();
    tree.insert_by_path_str("LL", 3).unwrap();
    tree.insert_by_path_str("LLR", 4).unwrap();

    assert!(tree.delete_by_value(&5));

    assert_eq!(value_at(&tree, "L"), Some(3));
    assert_eq!(value_at(&tree, "LR"), Some(4));
}

#[rstest]
fn given_single_node_when_delete_root_then_tree_is_empty() {
    let mut tree = BinaryTree::with_root(1);
    assert!(tree.delete_by_value(&1));
    assert!(tree.is_empty());
    assert_eq!(tree.render(), "");
}

#[rstest]
fn given_absent_value_when_delete_then_tree_unchanged(mut five: BinaryTree<i64>) {
    let before = five.clone();
    assert!(!five.delete_by_value(&42));
    assert_eq!(five, before);
}

#[rstest]
fn given_duplicates_when_delete_then_first_in_pre_order_goes() {
    // 1 appears at L (visited before R)
    let mut tree = BinaryTree::with_root(0);
    tree.insert_by_path_str("L", 1).unwrap();
    tree.insert_by_path_str("R", 1).unwrap();
    tree.insert_by_path_str("RL", 2).unwrap();

    assert!(tree.delete_by_value(&1));

    assert_eq!(value_at(&tree, "L"), None);
    assert_eq!(value_at(&tree, "R"), Some(1));
    assert_eq!(value_at(&tree, "RL"), Some(2));
}

// ============================================================
// edit_value / find
// ============================================================

/// A match is renamed and its subtree skipped; both branches are searched.
#[rstest]
fn given_duplicates_when_edit_then_topmost_match_in_each_branch_is_renamed() {
    let mut tree = BinaryTree::with_root(0);
    tree.insert_by_path_str("L", 7).unwrap();
    tree.insert_by_path_str("R", 7).unwrap();
    tree.insert_by_path_str("LL", 7).unwrap();

    assert!(tree.edit_value(&7, 8));

    assert_eq!(value_at(&tree, "L"), Some(8));
    assert_eq!(value_at(&tree, "R"), Some(8));
    assert_eq!(value_at(&tree, "LL"), Some(7));
}

#[rstest]
fn given_matching_root_when_edit_then_descendants_keep_their_value() {
    let mut tree = BinaryTree::with_root(7);
    tree.insert_by_path_str("L", 7).unwrap();
    tree.insert_by_path_str("R", 1).unwrap();

    assert!(tree.edit_value(&7, 9));

    assert_eq!(tree.root().unwrap().value, 9);
    assert_eq!(value_at(&tree, "L"), Some(7));
}

#[rstest]
fn given_absent_value_when_edit_then_no_match(mut five: BinaryTree<i64>) {
    assert!(!five.edit_value(&42, 43));
    assert!(five.find(&43).is_none());
}

#[rstest]
fn given_value_when_find_then_subtree_is_returned(five: BinaryTree<i64>) {
    let node = five.find(&5).unwrap();
    assert_eq!(node.left.as_ref().unwrap().value, 3);
    assert_eq!(node.right.as_ref().unwrap().value, 7);
}

// ============================================================
// render / range / delete_all
// ============================================================

#[rstest]
fn given_ordered_tree_when_range_then_ascending_values_within_bounds(ordered: BinaryTree<i64>) {
    assert_eq!(ordered.render_range(&5, &15), "5 7 10 12 15");
    assert_eq!(ordered.values_in_range(&13, &14), Vec::<&i64>::new());
    assert_eq!(ordered.render_range(&0, &100), "3 5 7 10 12 15 18");
}

#[rstest]
fn given_float_tree_when_range_with_integer_bounds_then_compared_numerically() {
    let mut tree = BinaryTree::with_root(Scalar::Float(5.5));
    tree.insert_by_path_str("L", Scalar::Float(2.5)).unwrap();
    tree.insert_by_path_str("R", Scalar::Float(7.5)).unwrap();
    tree.insert_by_path_str("RR", Scalar::Int(12)).unwrap();
    let lo: Scalar = "0".parse().unwrap();
    let hi: Scalar = "10".parse().unwrap();

    assert_eq!(tree.render_range(&lo, &hi), "2.5 5.5 7.5");
    assert_eq!(tree.render_range(&Scalar::Float(5.5), &Scalar::Int(12)), "5.5 7.5 12");
    assert!(tree.find(&Scalar::Int(12)).is_some());
    assert!(tree.edit_value(&Scalar::Int(12), Scalar::Float(12.5)));
}

#[rstest]
fn given_unordered_tree_when_range_then_in_order_filter_is_applied() {
    let mut tree = BinaryTree::with_root(1);
    tree.insert_by_path_str("L", 9).unwrap();
    tree.insert_by_path_str("R", 2).unwrap();
    assert_eq!(tree.render_range(&1, &9), "9 1 2");
}

#[rstest]
fn given_tree_when_render_then_markers_and_placeholders(mut five: BinaryTree<i64>) {
    five.delete_by_value(&5);
    let expected = "\
Root: 10
    L--- 7
        L--- 3
        R--- None
    R--- 15
";
    assert_eq!(five.render(), expected);
}

#[rstest]
fn given_tree_when_delete_all_then_every_node_is_released(mut ordered: BinaryTree<i64>) {
    ordered.delete_all();

    assert!(ordered.is_empty());
    assert_eq!(ordered.len(), 0);
    assert_eq!(ordered.render(), "");
    // a second teardown on an empty handle is a no-op
    ordered.delete_all();
}

#[rstest]
fn given_node_when_delete_all_then_child_links_are_empty(five: BinaryTree<i64>) {
    let mut root = five.root().unwrap().clone();
    root.delete_all();
    assert!(root.left.is_none());
    assert!(root.right.is_none());
    assert!(root.is_leaf());
}

proptest! {
    #[test]
    fn inserted_value_is_reachable_by_its_path(path in "[LR]{1,24}", value in any::<i64>()) {
        let mut tree = BinaryTree::with_root(0);
        for end in 1..path.len() {
            tree.insert_by_path_str(&path[..end], end as i64).unwrap();
        }
        tree.insert_by_path_str(&path, value).unwrap();

        let parsed: BinaryPath = path.parse().unwrap();
        prop_assert_eq!(tree.node_at(&parsed).map(|node| node.value), Some(value));
        prop_assert_eq!(tree.depth(), path.len() + 1);
    }
}

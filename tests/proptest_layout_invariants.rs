//! Property-based invariant tests for forest edits.
//!
//! These tests verify structural invariants that must hold for any forest
//! built from the closed kind set:
//!
//! 1. Removing a node and reinserting it at the same path restores the forest.
//! 2. `locate` agrees with pre-order traversal.
//! 3. Successful moves keep the id set and node count.
//! 4. Edits never change the input snapshot.
//! 5. Leaves refuse children.
//! 6. Insertion past the end clamps to the end.
//! 7. Reinserting a node that is still present is rejected.
//! 8. Snapshots restore to an equal forest.

use layout_tree::prelude::*;
use proptest::prelude::*;
use proptest::sample::Index;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Plain-data tree shape; turned into nodes inside each test case so every
/// case gets fresh ids.
#[derive(Debug, Clone)]
enum Shape {
    Leaf(NodeKind, u8),
    Container(NodeKind, Vec<Shape>),
}

fn leaf_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![Just(NodeKind::Text), Just(NodeKind::TextArea), Just(NodeKind::Image)]
}

fn container_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![Just(NodeKind::Row), Just(NodeKind::Column), Just(NodeKind::Section)]
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (leaf_kind(), any::<u8>()).prop_map(|(kind, n)| Shape::Leaf(kind, n)),
        container_kind().prop_map(|kind| Shape::Container(kind, Vec::new())),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (container_kind(), prop::collection::vec(inner, 0..4))
            .prop_map(|(kind, children)| Shape::Container(kind, children))
    })
}

fn forest_strategy() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(shape_strategy(), 0..4)
}

fn build_node(shape: &Shape) -> Node {
    match shape {
        Shape::Leaf(NodeKind::Image, n) => Node::image(format!("img-{n}.png")),
        Shape::Leaf(kind, n) => Node::create(*kind, Some(Payload::from(format!("text {n}")))),
        Shape::Container(kind, children) => {
            Node::container(*kind, children.iter().map(build_node)).expect("container kind")
        }
    }
}

fn build_forest(shapes: &[Shape]) -> Forest {
    Forest::from_roots(shapes.iter().map(build_node)).expect("fresh ids are unique")
}

fn all_paths(forest: &Forest) -> Vec<Path> {
    forest.walk().map(|(path, _)| path).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Remove then reinsert restores the forest
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn remove_then_reinsert_restores(shapes in forest_strategy(), pick in any::<Index>()) {
        let forest = build_forest(&shapes);
        let paths = all_paths(&forest);
        prop_assume!(!paths.is_empty());
        let path = &paths[pick.index(paths.len())];

        let (removed, without) = remove_at(&forest, path).unwrap();
        prop_assert_eq!(without.node_count(), forest.node_count() - removed.subtree_len());
        prop_assert!(!without.contains_id(removed.id()));

        let restored = insert_at(&without, path, removed).unwrap();
        prop_assert_eq!(&restored, &forest, "reinsert at {} did not restore", path);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. locate agrees with traversal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn locate_agrees_with_walk(shapes in forest_strategy()) {
        let forest = build_forest(&shapes);
        for (path, node) in forest.walk() {
            let found = locate(&forest, &path).unwrap();
            prop_assert!(std::ptr::eq(found, node), "locate({}) returned a different node", path);
            prop_assert_eq!(forest.path_of(node.id()), Some(path));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Successful moves keep ids and node count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn move_preserves_ids(
        shapes in forest_strategy(),
        from_pick in any::<Index>(),
        to_pick in any::<Index>(),
        offset in 0usize..3,
    ) {
        let forest = build_forest(&shapes);
        let paths = all_paths(&forest);
        prop_assume!(!paths.is_empty());
        let from = &paths[from_pick.index(paths.len())];
        let to = {
            let base = &paths[to_pick.index(paths.len())];
            base.with_last(base.last().unwrap_or(0) + offset)
        };
        let moved_id = locate(&forest, from).unwrap().id();

        if let Ok(next) = move_node(&forest, from, &to) {
            prop_assert_eq!(next.ids(), forest.ids());
            prop_assert_eq!(next.node_count(), forest.node_count());
            prop_assert!(next.validate().is_ok());
            prop_assert!(next.contains_id(moved_id));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Inputs are never changed
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edits_leave_input_untouched(
        shapes in forest_strategy(),
        from_pick in any::<Index>(),
        to_pick in any::<Index>(),
    ) {
        let forest = build_forest(&shapes);
        let before = forest.clone();
        let fingerprint = forest.fingerprint();
        let paths = all_paths(&forest);
        prop_assume!(!paths.is_empty());
        let from = &paths[from_pick.index(paths.len())];
        let to = &paths[to_pick.index(paths.len())];

        let _ = move_node(&forest, from, to);
        let _ = remove_at(&forest, to);
        let _ = insert_at(&forest, &to.child(0), Node::text("probe"));

        prop_assert_eq!(&forest, &before);
        prop_assert_eq!(forest.fingerprint(), fingerprint);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Leaves refuse children
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn leaves_refuse_children(shapes in forest_strategy(), slot in 0usize..3) {
        let forest = build_forest(&shapes);
        for (path, node) in forest.walk().filter(|(_, node)| node.is_leaf()) {
            let result = insert_at(&forest, &path.child(slot), Node::text("x"));
            prop_assert!(
                matches!(result, Err(LayoutError::InvalidParent { kind: Some(kind), .. }) if kind == node.kind()),
                "leaf at {} accepted a child",
                path
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Insertion clamps to the end
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insertion_clamps_to_end(shapes in forest_strategy(), extra in 0usize..100) {
        let forest = build_forest(&shapes);
        let mut parents: Vec<Path> = forest
            .walk()
            .filter(|(_, node)| node.is_container())
            .map(|(path, _)| path)
            .collect();
        parents.push(Path::root());

        for parent in parents {
            let len = if parent.is_empty() {
                forest.len()
            } else {
                locate(&forest, &parent).unwrap().child_count()
            };
            let node = Node::text("tail");
            let id = node.id();
            let next = insert_at(&forest, &parent.child(len + extra), node).unwrap();
            prop_assert_eq!(next.path_of(id), Some(parent.child(len)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Ids stay unique
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn present_node_cannot_be_inserted_again(shapes in forest_strategy(), pick in any::<Index>()) {
        let forest = build_forest(&shapes);
        let paths = all_paths(&forest);
        prop_assume!(!paths.is_empty());
        let path = &paths[pick.index(paths.len())];

        let copy = locate(&forest, path).unwrap().clone();
        let result = insert_at(&forest, &Path::from([0]), copy);
        prop_assert!(matches!(result, Err(LayoutError::DuplicateId(_))));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Snapshots restore
// ═════════════════════════════════════════════════════════════════════════

#[cfg(feature = "cache")]
proptest! {
    #[test]
    fn snapshot_restores_equal_forest(shapes in forest_strategy()) {
        let forest = build_forest(&shapes);
        let bytes = to_bytes(&forest).unwrap();
        let restored = from_bytes(&bytes).unwrap();
        prop_assert_eq!(restored.fingerprint(), forest.fingerprint());
        prop_assert_eq!(restored, forest);
    }
}

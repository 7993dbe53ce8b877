//! End-to-end editing scenarios through the public API.

use layout_tree::prelude::*;

fn texts(node: &Node) -> Vec<&str> {
    node.children().iter().filter_map(|child| child.text_content()).collect()
}

#[test]
fn insert_into_empty_forest() {
    let forest = Forest::new();
    let next = insert_at(&forest, &Path::root(), Node::row([])).unwrap();

    assert!(forest.is_empty());
    assert_eq!(next.len(), 1);
    let row = next.root(0).unwrap();
    assert!(row.is_row());
    assert!(!row.has_children());
}

#[test]
fn insert_nested_text() {
    let forest = Forest::from_roots([Node::row([])]).unwrap();
    let node = create_node(NodeKind::Text, Some("hi".into()));
    let next = insert_at(&forest, &Path::from([0, 0]), node).unwrap();

    let row = next.root(0).unwrap();
    assert_eq!(row.child_count(), 1);
    assert_eq!(locate(&next, &Path::from([0, 0])).unwrap().text_content(), Some("hi"));
}

#[test]
fn remove_then_locate_sibling() {
    let forest = Forest::from_roots([Node::row([Node::text("a"), Node::text("b")])]).unwrap();
    let (removed, next) = remove_at(&forest, &Path::from([0, 0])).unwrap();

    assert_eq!(removed.text_content(), Some("a"));
    assert_eq!(texts(next.root(0).unwrap()), ["b"]);
    assert_eq!(locate(&next, &Path::from([0, 0])).unwrap().text_content(), Some("b"));
    // Original snapshot still has both
    assert_eq!(texts(forest.root(0).unwrap()), ["a", "b"]);
}

#[test]
fn move_first_sibling_to_index_two() {
    let forest = Forest::from_roots([Node::text("A"), Node::text("B"), Node::text("C")]).unwrap();
    let ids: Vec<_> = forest.roots().iter().map(|n| n.id()).collect();

    let next = move_node(&forest, &Path::from([0]), &Path::from([2])).unwrap();

    let order: Vec<_> = next.roots().iter().filter_map(|n| n.text_content()).collect();
    assert_eq!(order, ["B", "C", "A"]);
    assert_eq!(next.root(2).unwrap().id(), ids[0]);
}

#[test]
fn locate_in_empty_row_is_not_found() {
    let forest = Forest::from_roots([Node::row([])]).unwrap();
    let err = locate(&forest, &Path::from([0, 0])).unwrap_err();
    assert!(matches!(err, LayoutError::NotFound { .. }));
    assert!(err.is_stale_target());
}

#[test]
fn insert_under_leaf_is_rejected() {
    let forest = Forest::from_roots([Node::text("leaf")]).unwrap();
    let err = insert_at(&forest, &Path::from([0, 0]), Node::text("child")).unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidParent { path: Path::from([0]), kind: Some(NodeKind::Text) }
    );
}

#[test]
fn move_into_own_subtree_fails_cleanly() {
    let forest =
        Forest::from_roots([Node::section([Node::row([Node::text("x")])]), Node::text("y")]).unwrap();
    let before = forest.fingerprint();

    // Once [0] is removed, [0] is the text "y", a leaf
    let err = move_node(&forest, &Path::from([0]), &Path::from([0, 0, 0])).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidParent { .. }));
    assert_eq!(forest.fingerprint(), before);
}

#[test]
fn path_strings_from_markup() {
    let forest = Forest::from_roots([Node::row([Node::column([Node::text("deep")])])]).unwrap();
    let path: Path = "0-0-0".parse().unwrap();
    assert_eq!(locate(&forest, &path).unwrap().text_content(), Some("deep"));

    let zone: DropZone = "0-0-end".parse().unwrap();
    let next = apply_drop(&forest, &Subject::palette(NodeKind::Image), &zone).unwrap();
    assert!(locate(&next, &Path::from([0, 0, 1])).unwrap().is_image());
}

#[test]
fn store_tracks_committed_edits() {
    let store = SharedLayoutStore::new();
    let key = LayoutKey::new("home");

    let version = store
        .edit(&key, |forest| insert_at(forest, &Path::root(), Node::section([])))
        .unwrap();
    assert_eq!(version, 1);

    let rejected = store.edit(&key, |forest| insert_at(forest, &Path::from([0, 0, 0]), Node::text("x")));
    assert!(rejected.is_err());
    assert_eq!(store.get(&key).unwrap().version, 1);

    let html = render_forest(&store.current(&key).unwrap(), &RenderConfig::PROD);
    assert_eq!(html, "<section></section>");
}

//! Path-addressed edits over forest snapshots.
//!
//! Every operation reads a `&Forest` and returns a new snapshot; the input
//! is never changed. Only the nodes on the edited path are copied
//! (`Arc::make_mut`), every other subtree is shared with the input.
//!
//! Failures come back as `LayoutError` values and mean "tree unchanged":
//! the caller simply keeps the forest it already holds.

use std::sync::Arc;

use crate::error::{LayoutError, LayoutResult};
use crate::kind::NodeKind;
use crate::node::{Children, Forest, Node, Payload};
use crate::path::Path;

/// Node at `path`.
///
/// The empty path, any out-of-range index, and descent below a leaf all
/// yield `NotFound`.
pub fn locate<'a>(forest: &'a Forest, path: &Path) -> LayoutResult<&'a Node> {
    forest.get(path).ok_or_else(|| LayoutError::not_found(path))
}

/// Remove the node at `path`, returning it with the new forest.
///
/// The empty path is a `NoOp`: the forest itself cannot be removed.
pub fn remove_at(forest: &Forest, path: &Path) -> LayoutResult<(Node, Forest)> {
    let Some((prefix, index)) = path.split_last() else {
        tracing::trace!("remove_at called with the empty path");
        return Err(LayoutError::NoOp("cannot remove the forest itself"));
    };

    let mut next = forest.clone();
    let siblings = sequence_mut(&mut next, prefix)
        .filter(|siblings| index < siblings.len())
        .ok_or_else(|| LayoutError::not_found(path))?;
    let removed = Arc::unwrap_or_clone(siblings.remove(index));

    tracing::debug!(path = %path, id = %removed.id(), kind = %removed.kind(), "removed node");
    Ok((removed, next))
}

/// Insert `node` so it ends up at `path`.
///
/// The final index is the slot in the parent's children; later siblings
/// shift right and indices past the end append. The empty path inserts at
/// the front of the forest. The parent must exist and be a container.
pub fn insert_at(forest: &Forest, path: &Path, node: Node) -> LayoutResult<Forest> {
    ensure_absent(forest, &node)?;

    let mut next = forest.clone();
    let Some((prefix, index)) = path.split_last() else {
        tracing::debug!(id = %node.id(), kind = %node.kind(), "inserted node at forest front");
        next.roots_mut().insert(0, Arc::new(node));
        return Ok(next);
    };

    check_parent(forest, prefix)?;
    let siblings = sequence_mut(&mut next, prefix).ok_or_else(|| LayoutError::InvalidParent {
        path: Path::from_slice(prefix),
        kind: None,
    })?;
    let slot = index.min(siblings.len());
    if slot != index {
        tracing::trace!(requested = index, slot, "clamped insertion index");
    }

    tracing::debug!(path = %path.with_last(slot), id = %node.id(), kind = %node.kind(), "inserted node");
    siblings.insert(slot, Arc::new(node));
    Ok(next)
}

/// Append `node` as the last child of the container at `parent`.
///
/// The empty path appends to the end of the forest.
pub fn append_child(forest: &Forest, parent: &Path, node: Node) -> LayoutResult<Forest> {
    let len = forest.sequence(parent.as_slice()).map_or(0, <[_]>::len);
    insert_at(forest, &parent.child(len), node)
}

/// Move the node at `from` to `to`.
///
/// The node is removed first and `to` is then read against the forest
/// *without* it. When source and destination share a parent and the source
/// comes first, every later index has already shifted down by one: moving
/// `[0]` to `[2]` in `[A, B, C]` yields `[B, C, A]`.
///
/// Id and payload are preserved. A source that cannot be located fails the
/// whole move; so does an insertion that cannot apply.
pub fn move_node(forest: &Forest, from: &Path, to: &Path) -> LayoutResult<Forest> {
    let (subject, without) = remove_at(forest, from)?;
    let destination = destination_after_removal(from, to);
    let id = subject.id();
    let moved = insert_at(&without, &destination, subject)?;

    tracing::debug!(%id, from = %from, to = %destination, "moved node");
    Ok(moved)
}

/// Fresh node of `kind` with empty children.
///
/// A payload the kind does not take is replaced with the kind's default.
pub fn create_node(kind: NodeKind, payload: Option<Payload>) -> Node {
    Node::create(kind, payload)
}

/// Replace the payload of the node at `path`.
pub fn set_payload_at(forest: &Forest, path: &Path, payload: Payload) -> LayoutResult<Forest> {
    let Some((prefix, index)) = path.split_last() else {
        return Err(LayoutError::not_found(path));
    };
    let kind = locate(forest, path)?.kind();
    if !kind.accepts(&payload) {
        return Err(LayoutError::PayloadMismatch(kind));
    }

    let mut next = forest.clone();
    let siblings = sequence_mut(&mut next, prefix).ok_or_else(|| LayoutError::not_found(path))?;
    let node = siblings.get_mut(index).ok_or_else(|| LayoutError::not_found(path))?;
    Arc::make_mut(node).set_payload(payload)?;
    Ok(next)
}

// =============================================================================
// Internal steps
// =============================================================================

/// Where a move inserts once its subject is gone.
///
/// The destination is taken verbatim and resolved against the post-removal
/// forest.
fn destination_after_removal(_from: &Path, to: &Path) -> Path {
    to.clone()
}

/// Parent at `prefix` must exist and hold children. `[]` is the forest.
fn check_parent(forest: &Forest, prefix: &[usize]) -> LayoutResult<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    let path = Path::from_slice(prefix);
    match forest.get(&path) {
        Some(parent) if parent.is_container() => Ok(()),
        Some(parent) => Err(LayoutError::InvalidParent { path, kind: Some(parent.kind()) }),
        None => Err(LayoutError::InvalidParent { path, kind: None }),
    }
}

/// None of the ids in `node`'s subtree may already be in `forest`, and the
/// subtree may not repeat an id itself.
fn ensure_absent(forest: &Forest, node: &Node) -> LayoutResult<()> {
    let mut ids = forest.ids();
    let mut duplicate = None;
    node.for_each_id(&mut |id| {
        if !ids.insert(id) && duplicate.is_none() {
            duplicate = Some(id);
        }
    });
    match duplicate {
        Some(id) => Err(LayoutError::DuplicateId(id)),
        None => Ok(()),
    }
}

/// Copy-on-write descent to the sequence named by `prefix`.
///
/// Clones each shared node on the way down. `None` when an index is out
/// of range or the prefix ends at a leaf.
fn sequence_mut<'a>(forest: &'a mut Forest, prefix: &[usize]) -> Option<&'a mut Children> {
    let mut siblings = forest.roots_mut();
    for &index in prefix {
        let node = Arc::make_mut(siblings.get_mut(index)?);
        if node.is_leaf() {
            return None;
        }
        siblings = node.children_mut();
    }
    Some(siblings)
}

// =============================================================================
// Tests
// =============================================================================

//! Binary snapshots of a forest.
//!
//! Uses a flat rkyv format: nodes live in one table and refer to their
//! children by index, which keeps the archived types non-recursive.
//! Loading validates the table before any `Node` is built, so a damaged or
//! hostile snapshot cannot produce a forest that breaks the invariants.

use std::sync::Arc;

use rkyv::rancor::Error as RkyvError;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};
use crate::id::NodeId;
use crate::kind::{NodeKind, PALETTE};
use crate::node::{Children, Forest, Node, Payload};

/// Current schema version for snapshot validation.
/// Increment this when making breaking changes to `SerForest`.
pub const SCHEMA_VERSION: u32 = 1;

/// Magic bytes for layout snapshots.
const MAGIC: [u8; 4] = *b"LYTR";

/// Deepest nesting a snapshot may describe; roots are at depth 1.
pub const MAX_DEPTH: usize = 256;

// =============================================================================
// Flat format
// =============================================================================

/// Serializable forest with flat node storage.
#[derive(Archive, RkyvSerialize, RkyvDeserialize, Debug)]
pub struct SerForest {
    /// Magic bytes for validation
    pub magic: [u8; 4],
    /// Schema version for compatibility checking
    pub schema_version: u32,
    /// All nodes (pre-order)
    pub nodes: Vec<SerNode>,
    /// Root node indices, in order
    pub roots: Vec<u32>,
}

/// Serializable node using indices instead of nested children.
#[derive(Archive, RkyvSerialize, RkyvDeserialize, Debug)]
pub struct SerNode {
    pub id: u64,
    /// Position of the kind in `PALETTE`
    pub kind: u8,
    /// Text content or image URL; `None` for containers
    pub payload: Option<String>,
    pub children: Vec<u32>,
}

// =============================================================================
// Public API
// =============================================================================

/// Serialize a forest to bytes.
pub fn to_bytes(forest: &Forest) -> LayoutResult<Vec<u8>> {
    let ser = to_serializable(forest);
    let bytes = rkyv::to_bytes::<RkyvError>(&ser)?;
    Ok(bytes.to_vec())
}

/// Deserialize bytes to a forest.
///
/// # Errors
///
/// - `InvalidMagic` if the bytes are not a layout snapshot
/// - `VersionMismatch` if the schema version is incompatible
/// - `Serialize` if the archive cannot be read
/// - `Corrupted` if nesting exceeds [`MAX_DEPTH`]
/// - `Corrupted` / `DuplicateId` / `LeafChildren` / `PayloadMismatch` if
///   the node table does not describe a valid forest
///
/// Every loaded id is reserved, so nodes created afterwards never collide
/// with them.
pub fn from_bytes(bytes: &[u8]) -> LayoutResult<Forest> {
    let mut aligned = AlignedVec::<16>::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    let ser = rkyv::from_bytes::<SerForest, RkyvError>(&aligned)?;

    if ser.magic != MAGIC {
        return Err(LayoutError::InvalidMagic { expected: MAGIC, found: ser.magic });
    }
    if ser.schema_version != SCHEMA_VERSION {
        return Err(LayoutError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: ser.schema_version,
        });
    }

    let forest = from_serializable(&ser)?;
    forest.validate()?;
    if let Some(max) = ser.nodes.iter().map(|n| n.id).max() {
        NodeId::reserve_through(NodeId::from_raw(max));
    }

    tracing::debug!(nodes = ser.nodes.len(), "loaded layout snapshot");
    Ok(forest)
}

// =============================================================================
// Conversion functions
// =============================================================================

fn to_serializable(forest: &Forest) -> SerForest {
    let mut nodes = Vec::with_capacity(forest.node_count());
    let roots = forest
        .roots()
        .iter()
        .map(|root| flatten_node(root, &mut nodes))
        .collect();

    SerForest {
        magic: MAGIC,
        schema_version: SCHEMA_VERSION,
        nodes,
        roots,
    }
}

fn flatten_node(node: &Node, nodes: &mut Vec<SerNode>) -> u32 {
    // Reserve our index
    let idx = nodes.len();

    let payload = match node.payload() {
        Payload::None => None,
        Payload::Text(text) => Some(text.to_string()),
        Payload::Image { src } => Some(src.to_string()),
    };
    nodes.push(SerNode {
        id: node.id().as_raw(),
        kind: kind_code(node.kind()),
        payload,
        children: Vec::new(),
    });

    let children = node
        .children()
        .iter()
        .map(|child| flatten_node(child, nodes))
        .collect();
    nodes[idx].children = children;

    idx as u32
}

fn from_serializable(ser: &SerForest) -> LayoutResult<Forest> {
    let mut visited = vec![false; ser.nodes.len()];
    let mut roots = Children::new();
    for &idx in &ser.roots {
        roots.push(Arc::new(unflatten_node(idx, 1, &ser.nodes, &mut visited)?));
    }
    if let Some(orphan) = visited.iter().position(|seen| !seen) {
        return Err(LayoutError::corrupted(format!("node {orphan} is unreachable")));
    }
    Ok(Forest::from_children(roots))
}

/// Rebuild the node at `idx`. Each table entry may be referenced once,
/// which rules out cycles and shared subtrees.
fn unflatten_node(idx: u32, depth: usize, nodes: &[SerNode], visited: &mut [bool]) -> LayoutResult<Node> {
    if depth > MAX_DEPTH {
        return Err(LayoutError::corrupted(format!("nesting deeper than {MAX_DEPTH} levels")));
    }
    let i = idx as usize;
    let ser = nodes
        .get(i)
        .ok_or_else(|| LayoutError::corrupted(format!("child index {idx} out of range")))?;
    if std::mem::replace(&mut visited[i], true) {
        return Err(LayoutError::corrupted(format!("node {idx} referenced twice")));
    }
    if ser.id == 0 {
        return Err(LayoutError::corrupted(format!("node {idx} has a detached id")));
    }

    let kind = PALETTE
        .get(ser.kind as usize)
        .copied()
        .ok_or_else(|| LayoutError::corrupted(format!("unknown kind code {}", ser.kind)))?;
    let payload = match (kind, &ser.payload) {
        (NodeKind::Row | NodeKind::Column | NodeKind::Section, None) => Payload::None,
        (NodeKind::Text | NodeKind::TextArea, Some(text)) => Payload::Text(text.as_str().into()),
        (NodeKind::Image, Some(src)) => Payload::image(src.as_str()),
        _ => return Err(LayoutError::PayloadMismatch(kind)),
    };
    if kind.is_leaf() && !ser.children.is_empty() {
        return Err(LayoutError::LeafChildren(kind));
    }

    let mut children: Children = SmallVec::with_capacity(ser.children.len());
    for &child in &ser.children {
        children.push(Arc::new(unflatten_node(child, depth + 1, nodes, visited)?));
    }

    Ok(Node::from_parts(NodeId::from_raw(ser.id), kind, payload, children))
}

fn kind_code(kind: NodeKind) -> u8 {
    PALETTE.iter().position(|k| *k == kind).unwrap_or_default() as u8
}

// =============================================================================
// Tests
// =============================================================================

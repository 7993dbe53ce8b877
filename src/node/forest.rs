//! Forest snapshot and its query/traversal API.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};
use crate::hash::{Fingerprint, StableHasher};
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::path::Path;

use super::{Children, Node, Payload};

// =============================================================================
// Forest
// =============================================================================

/// Ordered sequence of root nodes; the whole layout state.
///
/// There is no implicit single root. Cloning is shallow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Children,
}

impl Forest {
    /// Empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from root nodes, rejecting duplicate ids.
    pub fn from_roots(roots: impl IntoIterator<Item = Node>) -> LayoutResult<Self> {
        let forest = Self::from_children(roots.into_iter().map(Arc::new).collect());
        forest.validate()?;
        Ok(forest)
    }

    pub(crate) fn from_children(roots: Children) -> Self {
        Self { roots }
    }

    /// Root nodes in order.
    #[inline]
    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    /// Root at `index`, if any.
    pub fn root(&self, index: usize) -> Option<&Node> {
        self.roots.get(index).map(|root| &**root)
    }

    /// Number of root nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Children {
        &mut self.roots
    }

    /// Node at `path`. The empty path addresses no node.
    pub fn get(&self, path: &Path) -> Option<&Node> {
        let (first, rest) = path.as_slice().split_first()?;
        let mut node = self.root(*first)?;
        for &index in rest {
            node = node.child(index)?;
        }
        Some(node)
    }

    /// Sequence addressed by a parent prefix: the roots for `[]`, otherwise
    /// the children of the node at `prefix`.
    pub(crate) fn sequence(&self, prefix: &[usize]) -> Option<&[Arc<Node>]> {
        if prefix.is_empty() {
            return Some(&self.roots);
        }
        self.get(&Path::from_slice(prefix)).map(Node::children)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Depth-first, pre-order walk yielding each node with its path.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.roots)
    }

    /// First node (document order) matching predicate.
    pub fn find<F>(&self, predicate: F) -> Option<(Path, &Node)>
    where
        F: Fn(&Node) -> bool,
    {
        self.walk().find(|entry| predicate(entry.1))
    }

    /// All nodes matching predicate, in document order.
    pub fn find_all<F>(&self, predicate: F) -> Vec<(Path, &Node)>
    where
        F: Fn(&Node) -> bool,
    {
        self.walk().filter(|entry| predicate(entry.1)).collect()
    }

    /// Node with the given id.
    pub fn find_by_id(&self, id: NodeId) -> Option<&Node> {
        self.find(|node| node.id() == id).map(|(_, node)| node)
    }

    /// Current path of the node with the given id.
    pub fn path_of(&self, id: NodeId) -> Option<Path> {
        self.find(|node| node.id() == id).map(|(path, _)| path)
    }

    /// Whether any node carries `id`.
    pub fn contains_id(&self, id: NodeId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Check if any node matches predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Node) -> bool,
    {
        self.find(predicate).is_some()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|root| root.subtree_len()).sum()
    }

    /// Every id in the forest.
    pub fn ids(&self) -> FxHashSet<NodeId> {
        let mut ids = FxHashSet::default();
        for root in &self.roots {
            root.for_each_id(&mut |id| {
                ids.insert(id);
            });
        }
        ids
    }

    /// Check the forest invariants: unique ids, childless leaves, payload
    /// shapes matching kinds. Reports the first violation found.
    pub fn validate(&self) -> LayoutResult<()> {
        let mut seen = FxHashSet::default();
        for (_, node) in self.walk() {
            if !seen.insert(node.id()) {
                return Err(LayoutError::DuplicateId(node.id()));
            }
            if node.is_leaf() && node.has_children() {
                return Err(LayoutError::LeafChildren(node.kind()));
            }
            if !node.kind().accepts(node.payload()) {
                return Err(LayoutError::PayloadMismatch(node.kind()));
            }
        }
        Ok(())
    }

    /// Collect statistics about the forest
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for (path, node) in self.walk() {
            stats.max_depth = stats.max_depth.max(path.len());
            match node.kind() {
                NodeKind::Row => stats.rows += 1,
                NodeKind::Column => stats.columns += 1,
                NodeKind::Section => stats.sections += 1,
                NodeKind::Text => stats.texts += 1,
                NodeKind::TextArea => stats.text_areas += 1,
                NodeKind::Image => stats.images += 1,
            }
        }
        stats
    }

    /// Content fingerprint: equal for structurally equal forests.
    ///
    /// Covers ids, kinds, payloads and shape, so moving a node changes it.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = StableHasher::new().update_str("__forest__");
        for root in &self.roots {
            hasher = hash_node(hasher, root);
        }
        Fingerprint(hasher.finish())
    }
}

fn hash_node(hasher: StableHasher, node: &Node) -> StableHasher {
    let mut hasher = hasher
        .update_u64(node.id().as_raw())
        .update_str(node.kind().name());
    hasher = match node.payload() {
        Payload::None => hasher.update_u8(0),
        Payload::Text(text) => hasher.update_u8(1).update_str(text),
        Payload::Image { src } => hasher.update_u8(2).update_str(src),
    };
    hasher = hasher.update_usize(node.child_count());
    for child in node.children() {
        hasher = hash_node(hasher, child);
    }
    hasher
}

// =============================================================================
// Walk - depth-first traversal with paths
// =============================================================================

/// Depth-first iterator over `(Path, &Node)` pairs.
pub struct Walk<'a> {
    stack: SmallVec<[(Path, &'a Node); 16]>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [Arc<Node>]) -> Self {
        let mut stack = SmallVec::new();
        // Push in reverse so roots are visited left-to-right
        for (index, root) in roots.iter().enumerate().rev() {
            stack.push((Path::from_slice(&[index]), &**root));
        }
        Self { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Path, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (index, child) in node.children().iter().enumerate().rev() {
            self.stack.push((path.child(index), &**child));
        }
        Some((path, node))
    }
}

// =============================================================================
// Stats - forest statistics
// =============================================================================

/// Forest statistics collected from traversal
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub rows: usize,
    pub columns: usize,
    pub sections: usize,
    pub texts: usize,
    pub text_areas: usize,
    pub images: usize,
    /// Length of the longest path (0 for an empty forest)
    pub max_depth: usize,
}

impl Stats {
    /// Total container nodes (row + column + section)
    pub fn container_count(&self) -> usize {
        self.rows + self.columns + self.sections
    }

    /// Total leaf nodes (text + text area + image)
    pub fn leaf_count(&self) -> usize {
        self.texts + self.text_areas + self.images
    }

    pub fn node_count(&self) -> usize {
        self.container_count() + self.leaf_count()
    }
}

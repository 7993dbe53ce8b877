//! Node types: `Node`, `Payload`, `Forest`.
//!
//! A `Node` owns its children through `Arc`, so cloning a node or a forest
//! is shallow and edits can rebuild only the spine they touch while sharing
//! every untouched subtree with the previous snapshot.
//!
//! # Invariants
//!
//! - leaf kinds never hold children (constructors refuse them)
//! - the payload always has the shape the kind accepts
//! - ids are unique within a forest (checked on insertion and by
//!   [`Forest::validate`])

mod forest;
mod payload;

pub use forest::{Forest, Stats, Walk};
pub use payload::Payload;

use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};
use crate::id::NodeId;
use crate::kind::NodeKind;

/// Type alias for children collection.
pub type Children = SmallVec<[Arc<Node>; 4]>;

/// A single element of the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    payload: Payload,
    children: Children,
}

impl Node {
    /// Create a node with a fresh id and no children.
    ///
    /// A payload the kind does not accept (or no payload) falls back to the
    /// kind's default payload.
    pub fn create(kind: NodeKind, payload: Option<Payload>) -> Self {
        let payload = match payload {
            Some(payload) if kind.accepts(&payload) => payload,
            Some(payload) => {
                tracing::debug!(kind = %kind, ?payload, "payload not accepted by kind, using default");
                kind.default_payload()
            }
            None => kind.default_payload(),
        };
        Self {
            id: NodeId::fresh(),
            kind,
            payload,
            children: SmallVec::new(),
        }
    }

    /// Create a node with the kind's default payload.
    pub fn new(kind: NodeKind) -> Self {
        Self::create(kind, None)
    }

    /// Create a node of any kind with children.
    ///
    /// Fails with `LeafChildren` when a leaf kind is given children.
    pub fn container(kind: NodeKind, children: impl IntoIterator<Item = Node>) -> LayoutResult<Self> {
        let mut node = Self::new(kind);
        for child in children {
            node.push_child(child)?;
        }
        Ok(node)
    }

    /// Rebuild a node from stored parts. The caller has validated them.
    pub(crate) fn from_parts(id: NodeId, kind: NodeKind, payload: Payload, children: Children) -> Self {
        debug_assert!(kind.accepts(&payload));
        debug_assert!(kind.is_container() || children.is_empty());
        Self { id, kind, payload, children }
    }

    fn leaf(kind: NodeKind, payload: Payload) -> Self {
        Self::create(kind, Some(payload))
    }

    fn container_unchecked(kind: NodeKind, children: impl IntoIterator<Item = Node>) -> Self {
        debug_assert!(kind.is_container());
        let mut node = Self::new(kind);
        node.children.extend(children.into_iter().map(Arc::new));
        node
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typed constructors
    // ─────────────────────────────────────────────────────────────────────────

    impl_container_ctors!(row => Row, column => Column, section => Section);

    impl_text_leaf_ctors!(text => Text, text_area => TextArea);

    /// Create an `Image` leaf with a fresh id
    pub fn image(src: impl Into<compact_str::CompactString>) -> Self {
        Self::leaf(NodeKind::Image, Payload::image(src))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Child nodes in order.
    #[inline]
    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    /// Child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).map(|child| &**child)
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    impl_kind_predicates!(self.kind; Row, Column, Section, Text, TextArea, Image);

    /// Text content for text kinds.
    pub fn text_content(&self) -> Option<&str> {
        self.payload.as_text()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Visit every id in this subtree (pre-order).
    pub fn for_each_id(&self, f: &mut impl FnMut(NodeId)) {
        f(self.id);
        for child in &self.children {
            child.for_each_id(f);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation of an owned node (before it enters a forest)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the payload, keeping id and position.
    pub fn set_payload(&mut self, payload: Payload) -> LayoutResult<()> {
        if !self.kind.accepts(&payload) {
            return Err(LayoutError::PayloadMismatch(self.kind));
        }
        self.payload = payload;
        Ok(())
    }

    /// Builder form of [`Node::set_payload`].
    pub fn with_payload(mut self, payload: Payload) -> LayoutResult<Self> {
        self.set_payload(payload)?;
        Ok(self)
    }

    /// Append a child. Leaf kinds refuse.
    pub fn push_child(&mut self, child: Node) -> LayoutResult<()> {
        if self.kind.is_leaf() {
            return Err(LayoutError::LeafChildren(self.kind));
        }
        self.children.push(Arc::new(child));
        Ok(())
    }

    /// Builder form of [`Node::push_child`].
    pub fn with_child(mut self, child: Node) -> LayoutResult<Self> {
        self.push_child(child)?;
        Ok(self)
    }

    /// Children for copy-on-write editing. Only containers reach here.
    pub(crate) fn children_mut(&mut self) -> &mut Children {
        debug_assert!(self.kind.is_container());
        &mut self.children
    }
}

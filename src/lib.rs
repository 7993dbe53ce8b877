//! layout-tree - Path-addressed layout forest for drag-and-drop builders
//!
//! ## Core Concepts
//!
//! **Forest snapshots**: the layout is an ordered list of root nodes. Every
//! edit takes a `&Forest` and returns a new one; untouched subtrees are
//! shared between snapshots through `Arc`.
//!
//! **Paths, not pointers**: nodes are addressed by child-index paths
//! (`[0, 2, 1]`). A path is only valid for the snapshot it came from. Node
//! ids, by contrast, survive moves.
//!
//! **Closed kinds**: `NodeKind` is a fixed enumeration; containers (row,
//! column, section) hold children, leaves (text, text area, image) hold a
//! payload.
//!
//! ## Modules
//! - `edit`: locate / remove / insert / move / create
//! - `gesture`: committed drops from a builder UI
//! - `node`: Node, Payload, Forest
//! - `path`: Path addressing and parsing
//! - `render`: HTML export
//! - `store`: shared holder for current snapshots
//! - `serialize`: binary snapshots (feature `cache`)
//!
//! ## Usage
//!
//! ```
//! use layout_tree::{edit, Forest, Node, Path};
//!
//! let forest = Forest::from_roots([Node::row([])]).unwrap();
//! let forest = edit::insert_at(&forest, &Path::from([0, 0]), Node::text("hi")).unwrap();
//! assert_eq!(edit::locate(&forest, &Path::from([0, 0])).unwrap().text_content(), Some("hi"));
//! ```

#[macro_use]
mod macros;

/// Node kinds and their static metadata
pub mod kind;

/// Node identity
pub mod id;

/// Node types: Node, Payload, Forest
pub mod node;

/// Structural addresses
pub mod path;

/// Snapshot edits: locate, remove_at, insert_at, move_node, create_node
pub mod edit;

/// Drop resolution for builder UIs
pub mod gesture;

/// Deterministic hashing
pub mod hash;

/// Error types
pub mod error;

/// HTML rendering
pub mod render;

/// Shared snapshot store
pub mod store;

/// Binary snapshot serialization
#[cfg(feature = "cache")]
pub mod serialize;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Forest, Node, Payload, Stats};

// Kinds
pub use kind::{NodeKind, PALETTE};

// Identity and addressing
pub use id::NodeId;
pub use path::Path;

// Operations
pub use edit::{append_child, create_node, insert_at, locate, move_node, remove_at, set_payload_at};
pub use gesture::{apply_drop, DropZone, Subject};

// Hashing
pub use hash::{Fingerprint, StableHasher};

// Error types
pub use error::{LayoutError, LayoutResult};

// Store types
pub use store::{LayoutEntry, LayoutKey, LayoutStore, SharedLayoutStore};

// Re-export rkyv for downstream snapshot handling
#[cfg(feature = "cache")]
pub use rkyv;

// =============================================================================
// Tests
// =============================================================================

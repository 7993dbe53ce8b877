//! Prelude module for common imports.
//!
//! ```
//! use layout_tree::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Forest, Node, Payload, Stats, Walk};

// Kinds
pub use crate::kind::{NodeKind, PALETTE};

// Identity and addressing
pub use crate::id::NodeId;
pub use crate::path::Path;

// Operations
pub use crate::edit::{
    append_child, create_node, insert_at, locate, move_node, remove_at, set_payload_at,
};
pub use crate::gesture::{apply_drop, delete, DropZone, Subject};

// Hashing
pub use crate::hash::{Fingerprint, StableHasher};

// Error
pub use crate::error::{LayoutError, LayoutResult};

// Render
pub use crate::render::{render_forest, render_node, RenderConfig, DEFAULT_ID_ATTR};

// Store
pub use crate::store::{LayoutEntry, LayoutKey, LayoutStore, SharedLayoutStore};

// Serialization
#[cfg(feature = "cache")]
pub use crate::serialize::{from_bytes, to_bytes, SCHEMA_VERSION};

//! Error types for layout-tree.
//!
//! Every failure is a recoverable value. A caller that receives an error
//! keeps its previous forest: no operation applies partially.

use thiserror::Error;

use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::path::Path;

/// Errors that can occur during layout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The path does not resolve to an existing node
    #[error("no node at path [{path}]")]
    NotFound {
        /// The path that failed to resolve
        path: Path,
    },

    /// The insertion parent is missing or cannot hold children
    #[error("{} at [{path}] cannot accept children", describe_parent(.kind))]
    InvalidParent {
        /// Path of the would-be parent
        path: Path,
        /// Kind of the parent, `None` when it does not exist
        kind: Option<NodeKind>,
    },

    /// The operation cannot apply to this input
    #[error("no-op: {0}")]
    NoOp(&'static str),

    /// The node (or one of its descendants) already lives in the forest
    #[error("node id {0} is already present in the forest")]
    DuplicateId(NodeId),

    /// The payload shape does not match the node kind
    #[error("{0} nodes do not take this payload")]
    PayloadMismatch(NodeKind),

    /// A child was offered to a leaf kind
    #[error("{0} nodes cannot have children")]
    LeafChildren(NodeKind),

    /// Path text could not be parsed
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// Kind name is not one of the known variants
    #[error("unknown node kind: {0:?}")]
    UnknownKind(String),

    /// Snapshot was written with an incompatible schema
    #[error("snapshot version mismatch: expected v{expected}, found v{found}")]
    VersionMismatch {
        /// Expected schema version
        expected: u32,
        /// Found schema version
        found: u32,
    },

    /// Magic bytes validation failed
    #[error("invalid snapshot format: expected magic bytes {expected:?}, found {found:?}")]
    InvalidMagic {
        /// Expected magic bytes
        expected: [u8; 4],
        /// Found magic bytes
        found: [u8; 4],
    },

    /// Snapshot data is structurally invalid
    #[error("snapshot corrupted: {0}")]
    Corrupted(String),

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialize(String),
}

fn describe_parent(kind: &Option<NodeKind>) -> String {
    match kind {
        Some(kind) => format!("{} node", kind.name()),
        None => "missing node".to_string(),
    }
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

impl LayoutError {
    /// Create a not-found error for a path.
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound { path: path.clone() }
    }

    /// Create a corruption error with a message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Create a serialization error from any error type.
    pub fn serialize(err: impl std::error::Error) -> Self {
        Self::Serialize(err.to_string())
    }

    /// Whether the error means "the addressed node is gone".
    ///
    /// A UI can silently ignore such drops: the gesture refers to a stale
    /// snapshot.
    pub fn is_stale_target(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidParent { kind: None, .. })
    }
}

#[cfg(feature = "cache")]
impl From<rkyv::rancor::Error> for LayoutError {
    fn from(err: rkyv::rancor::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LayoutError::not_found(&Path::from_slice(&[0, 2, 1]));
        assert_eq!(err.to_string(), "no node at path [0.2.1]");

        let err = LayoutError::InvalidParent {
            path: Path::from_slice(&[1]),
            kind: Some(NodeKind::Text),
        };
        assert_eq!(err.to_string(), "text node at [1] cannot accept children");

        let err = LayoutError::InvalidParent { path: Path::from_slice(&[4]), kind: None };
        assert_eq!(err.to_string(), "missing node at [4] cannot accept children");

        let err = LayoutError::VersionMismatch { expected: 2, found: 1 };
        assert_eq!(err.to_string(), "snapshot version mismatch: expected v2, found v1");
    }

    #[test]
    fn test_stale_target() {
        assert!(LayoutError::not_found(&Path::root()).is_stale_target());
        assert!(!LayoutError::NoOp("empty path").is_stale_target());
        assert!(!LayoutError::InvalidParent {
            path: Path::root(),
            kind: Some(NodeKind::Image),
        }
        .is_stale_target());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LayoutError>();
    }
}

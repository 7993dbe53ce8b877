//! Process-unique node identity
//!
//! Every node gets a `NodeId` when it is created. The id follows the node
//! through moves (only its `Path` changes) and is never handed out twice
//! within a running process.
//!
//! # Allocation
//!
//! Ids come from a single monotonic atomic counter. Snapshots loaded from
//! bytes carry ids from an earlier process; loading them calls
//! [`NodeId::reserve_through`] so the counter skips past every loaded id.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id to hand out. Zero is reserved for `NodeId::detached()`.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// NodeId
// =============================================================================

/// Opaque, stable node identifier
///
/// # Memory Layout
///
/// - 8 bytes (u64)
/// - Copy, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Allocate a fresh id.
    #[inline]
    pub fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a NodeId from a raw u64 value.
    ///
    /// Intended for deserialization. Callers that build nodes from raw ids
    /// must also call [`NodeId::reserve_through`].
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Make sure no future `fresh()` id is `<= max`.
    pub fn reserve_through(max: NodeId) {
        NEXT_ID.fetch_max(max.0.saturating_add(1), Ordering::Relaxed);
    }

    /// Placeholder id that never names a real node.
    #[inline]
    pub const fn detached() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_detached(&self) -> bool {
        self.0 == 0
    }

    /// Lowercase base-36 form, used in rendered `data-node-id` attributes.
    pub fn to_attr_value(self) -> String {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut n = self.0;
        let mut buf = Vec::with_capacity(13);
        loop {
            buf.push(DIGITS[(n % 36) as usize]);
            n /= 36;
            if n == 0 {
                break;
            }
        }
        buf.reverse();
        // DIGITS is ASCII
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_detached() {
            write!(f, "NodeId(detached)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_attr_value())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::detached()
    }
}

// =============================================================================
// Tests
// =============================================================================

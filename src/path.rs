//! Structural addresses into a forest.
//!
//! A `Path` is a sequence of child indices descending from the forest root:
//! `[0, 2, 1]` is the first root's third child's second child. Paths are
//! only meaningful for the snapshot they were derived from; any edit earlier
//! in document order can shift them.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::LayoutError;

/// Index path from the forest root to a node.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(SmallVec<[usize; 8]>);

impl Path {
    /// The empty path, addressing the forest itself.
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Build a path from a slice of indices.
    pub fn from_slice(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    /// Indices as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final index (the slot within the containing sequence).
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the containing node; `None` for the empty path.
    ///
    /// A single-index path has the empty path (the forest) as its parent.
    pub fn parent(&self) -> Option<Path> {
        let (_, prefix) = self.0.split_last()?;
        Some(Self::from_slice(prefix))
    }

    /// Split into (parent prefix, final index).
    pub fn split_last(&self) -> Option<(&[usize], usize)> {
        self.0.split_last().map(|(last, prefix)| (prefix, *last))
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Same parent, different final index.
    ///
    /// The empty path is returned unchanged.
    pub fn with_last(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        if let Some(last) = indices.last_mut() {
            *last = index;
        }
        Self(indices)
    }

    /// Whether `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }

    /// Iterate over the indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self::from_slice(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self::from_slice(&indices)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(indices))
    }
}

impl FromIterator<usize> for Path {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path{:?}", self.as_slice())
    }
}

/// Dot-separated indices; the empty path renders as an empty string.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Accepts `.` or `-` as separator (`"0.1.2"`, `"0-1-2"`).
///
/// Mixing separators is rejected, as are empty segments.
impl FromStr for Path {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::root());
        }
        let sep = if s.contains('.') { '.' } else { '-' };
        s.split(sep)
            .map(|segment| {
                // `usize::parse` would also take a leading `+`
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(LayoutError::InvalidPath(s.to_string()));
                }
                segment
                    .parse::<usize>()
                    .map_err(|_| LayoutError::InvalidPath(s.to_string()))
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Committed drops: the boundary between a builder UI and the edit core.
//!
//! A UI resolves a finished drag into a [`Subject`] (what is dropped) and a
//! [`DropZone`] (where), then calls [`apply_drop`] and replaces its held
//! forest with the result. Hover state never reaches this module.

use std::fmt;
use std::str::FromStr;

use crate::edit;
use crate::error::{LayoutError, LayoutResult};
use crate::kind::NodeKind;
use crate::node::{Forest, Payload};
use crate::path::Path;

/// What is being dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A new node dragged in from the palette
    Palette {
        kind: NodeKind,
        payload: Option<Payload>,
    },
    /// An existing node, addressed in the snapshot the drag started from
    Existing(Path),
}

impl Subject {
    /// Palette subject with the kind's default payload.
    pub fn palette(kind: NodeKind) -> Self {
        Self::Palette { kind, payload: None }
    }
}

/// Where a subject lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropZone {
    /// Insert into the slot named by the path (before whatever sits there)
    At(Path),
    /// Append as last child of the container at the path; the empty path is
    /// the end of the forest
    End(Path),
}

impl DropZone {
    /// Concrete insertion path against `forest`.
    pub fn resolve(&self, forest: &Forest) -> Path {
        match self {
            Self::At(path) => path.clone(),
            Self::End(parent) => {
                let len = forest.sequence(parent.as_slice()).map_or(0, <[_]>::len);
                parent.child(len)
            }
        }
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(path) => write!(f, "{path}"),
            Self::End(parent) if parent.is_empty() => f.write_str("end"),
            Self::End(parent) => write!(f, "{parent}.end"),
        }
    }
}

/// Drop-zone text as builder markup encodes it: `"0-1"` (slot), `"0-1-end"`
/// or `"0.1.end"` (append into `[0, 1]`), `"end"` (end of forest).
impl FromStr for DropZone {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "end" {
            return Ok(Self::End(Path::root()));
        }
        match s.strip_suffix("-end").or_else(|| s.strip_suffix(".end")) {
            Some(parent) => Ok(Self::End(parent.parse()?)),
            None => Ok(Self::At(s.parse()?)),
        }
    }
}

/// Apply a committed drop.
///
/// Palette subjects create a fresh node and insert it; existing subjects
/// are moved (remove, then insert against the post-removal forest). Any
/// error leaves the caller's forest as it was.
pub fn apply_drop(forest: &Forest, subject: &Subject, zone: &DropZone) -> LayoutResult<Forest> {
    let result = match subject {
        Subject::Palette { kind, payload } => {
            let node = edit::create_node(*kind, payload.clone());
            edit::insert_at(forest, &zone.resolve(forest), node)
        }
        Subject::Existing(from) => match zone {
            DropZone::At(to) => edit::move_node(forest, from, to),
            DropZone::End(parent) => {
                // "End" is resolved after the subject is gone, so a node
                // dropped at the end of its own list lands last.
                let (node, without) = edit::remove_at(forest, from)?;
                edit::append_child(&without, parent, node)
            }
        },
    };

    if let Err(err) = &result {
        tracing::debug!(?subject, zone = %zone, error = %err, "drop rejected");
    }
    result
}

/// Remove the node at `path` and discard it (trash drop zone).
pub fn delete(forest: &Forest, path: &Path) -> LayoutResult<Forest> {
    edit::remove_at(forest, path).map(|(_, next)| next)
}

//! The closed set of node kinds and their static metadata.
//!
//! Each kind answers three questions at compile time: can it hold children,
//! what payload does it carry, and how is it presented (palette label and
//! HTML tag). Behavior that differs per kind is a `match` over `NodeKind`.

use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;
use crate::node::Payload;

/// Node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Horizontal container
    Row,
    /// Vertical container
    Column,
    /// Page section container
    Section,
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// Image by URL
    Image,
}

/// All kinds in palette (sidebar) order.
pub const PALETTE: [NodeKind; 6] = [
    NodeKind::Row,
    NodeKind::Column,
    NodeKind::Section,
    NodeKind::Text,
    NodeKind::TextArea,
    NodeKind::Image,
];

impl NodeKind {
    impl_kind_predicates!(self; Row, Column, Section, Text, TextArea, Image);

    /// Whether nodes of this kind may have children.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Row | Self::Column | Self::Section)
    }

    /// Whether this is a leaf kind (never has children).
    #[inline]
    pub const fn is_leaf(self) -> bool {
        !self.is_container()
    }

    /// Stable machine name, also the `FromStr` spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
            Self::Section => "section",
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Image => "image",
        }
    }

    /// Human-readable palette label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Row => "Row",
            Self::Column => "Column",
            Self::Section => "Section",
            Self::Text => "Text",
            Self::TextArea => "Text Area",
            Self::Image => "Image",
        }
    }

    /// HTML tag used when exporting.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Row | Self::Column => "div",
            Self::Section => "section",
            Self::Text => "p",
            Self::TextArea => "textarea",
            Self::Image => "img",
        }
    }

    /// Payload a freshly created node of this kind carries.
    pub fn default_payload(self) -> Payload {
        match self {
            Self::Row | Self::Column | Self::Section => Payload::None,
            Self::Text | Self::TextArea => Payload::Text(Default::default()),
            Self::Image => Payload::Image { src: Default::default() },
        }
    }

    /// Whether `payload` has the shape this kind stores.
    pub fn accepts(self, payload: &Payload) -> bool {
        matches!(
            (self, payload),
            (Self::Row | Self::Column | Self::Section, Payload::None)
                | (Self::Text | Self::TextArea, Payload::Text(_))
                | (Self::Image, Payload::Image { .. })
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LayoutError::UnknownKind(s.to_string()))
    }
}

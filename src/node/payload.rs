//! Variant-specific node data.

use compact_str::CompactString;

/// Data a node carries besides its children.
///
/// Containers carry `None`; text kinds carry their content; images carry a
/// source URL. `NodeKind::accepts` decides which shape a kind stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Payload {
    #[default]
    None,
    Text(CompactString),
    Image { src: CompactString },
}

impl Payload {
    /// Image payload from a URL.
    pub fn image(src: impl Into<CompactString>) -> Self {
        Self::Image { src: src.into() }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Text content, for text kinds.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Image URL, for images.
    pub fn image_src(&self) -> Option<&str> {
        match self {
            Self::Image { src } => Some(src),
            _ => None,
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

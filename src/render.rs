//! HTML export for layout forests
//!
//! Turns a snapshot into static markup. Containers become `<div>`s with a
//! kind class (or `<section>`), text kinds become `<p>` / `<textarea>`,
//! images become void `<img>` elements.

use crate::kind::NodeKind;
use crate::node::{Forest, Node, Payload};

// =============================================================================
// RenderConfig
// =============================================================================

/// Default attribute name for node ids in exported markup.
pub const DEFAULT_ID_ATTR: &str = "data-node-id";

/// Configuration for HTML rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to emit node id attributes (lets a UI map DOM back to nodes).
    pub emit_ids: bool,
    /// Whether to minify output (no newlines or indentation).
    pub minify: bool,
    /// Attribute name for node ids (default: "data-node-id").
    pub id_attr_name: String,
}

impl RenderConfig {
    /// Development config (emit IDs, indented).
    pub const DEV: Self = Self {
        emit_ids: true,
        minify: false,
        id_attr_name: String::new(), // Will use DEFAULT_ID_ATTR
    };

    /// Production config (no IDs, minify).
    pub const PROD: Self = Self {
        emit_ids: false,
        minify: true,
        id_attr_name: String::new(),
    };

    pub fn new(emit_ids: bool, minify: bool) -> Self {
        Self {
            emit_ids,
            minify,
            id_attr_name: DEFAULT_ID_ATTR.to_string(),
        }
    }

    /// Set custom attribute name for node ids.
    pub fn with_id_attr(mut self, attr_name: impl Into<String>) -> Self {
        self.id_attr_name = attr_name.into();
        self
    }

    /// Get the attribute name for node ids.
    pub fn id_attr(&self) -> &str {
        if self.id_attr_name.is_empty() {
            DEFAULT_ID_ATTR
        } else {
            &self.id_attr_name
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::DEV
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a whole forest to HTML.
pub fn render_forest(forest: &Forest, config: &RenderConfig) -> String {
    let mut output = String::new();
    for root in forest.roots() {
        render_into(root, 0, config, &mut output);
    }
    output
}

/// Render a single subtree to HTML.
pub fn render_node(node: &Node, config: &RenderConfig) -> String {
    let mut output = String::new();
    render_into(node, 0, config, &mut output);
    output
}

fn render_into(node: &Node, depth: usize, config: &RenderConfig, output: &mut String) {
    indent(depth, config, output);
    open_tag(node, config, output);

    match (node.kind(), node.payload()) {
        (NodeKind::Image, _) => {
            output.push_str(" />");
        }
        (_, Payload::Text(text)) => {
            output.push('>');
            output.push_str(&escape_html(text));
            close_tag(node.kind(), output);
        }
        _ if node.has_children() => {
            output.push('>');
            newline(config, output);
            for child in node.children() {
                render_into(child, depth + 1, config, output);
            }
            indent(depth, config, output);
            close_tag(node.kind(), output);
        }
        _ => {
            output.push('>');
            close_tag(node.kind(), output);
        }
    }
    newline(config, output);
}

/// `<tag` plus attributes, without the closing `>`.
fn open_tag(node: &Node, config: &RenderConfig, output: &mut String) {
    let kind = node.kind();
    output.push('<');
    output.push_str(kind.tag());

    match kind {
        NodeKind::Row | NodeKind::Column => push_attr("class", kind.name(), output),
        NodeKind::Image => {
            push_attr("src", node.payload().image_src().unwrap_or_default(), output);
            push_attr("alt", "", output);
        }
        _ => {}
    }

    if config.emit_ids {
        push_attr(config.id_attr(), &node.id().to_attr_value(), output);
    }
}

fn close_tag(kind: NodeKind, output: &mut String) {
    output.push_str("</");
    output.push_str(kind.tag());
    output.push('>');
}

fn push_attr(name: &str, value: &str, output: &mut String) {
    output.push(' ');
    output.push_str(name);
    output.push_str("=\"");
    output.push_str(&escape_attr(value));
    output.push('"');
}

fn indent(depth: usize, config: &RenderConfig, output: &mut String) {
    if !config.minify {
        output.extend(std::iter::repeat_n("  ", depth));
    }
}

fn newline(config: &RenderConfig, output: &mut String) {
    if !config.minify {
        output.push('\n');
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;

    #[test]
    fn test_render_minified() {
        let forest = Forest::from_roots([Node::row([Node::text("hi"), Node::image("a.png")])]).unwrap();
        let html = render_forest(&forest, &RenderConfig::PROD);
        assert_eq!(
            html,
            r#"<div class="row"><p>hi</p><img src="a.png" alt="" /></div>"#
        );
    }

    #[test]
    fn test_render_indented() {
        let forest = Forest::from_roots([Node::section([Node::text_area("notes")])]).unwrap();
        let html = render_forest(&forest, &RenderConfig::new(false, false));
        assert_eq!(html, "<section>\n  <textarea>notes</textarea>\n</section>\n");
    }

    #[test]
    fn test_render_empty_container() {
        let html = render_node(&Node::column([]), &RenderConfig::PROD);
        assert_eq!(html, r#"<div class="column"></div>"#);
    }

    #[test]
    fn test_render_emits_ids() {
        let node = Node::text("x");
        let html = render_node(&node, &RenderConfig::DEV);
        let expected = format!("data-node-id=\"{}\"", node.id().to_attr_value());
        assert!(html.contains(&expected));
    }

    #[test]
    fn test_custom_id_attr() {
        let node = Node::row([]);
        let config = RenderConfig::new(true, true).with_id_attr("data-block");
        let html = render_node(&node, &config);
        assert!(html.contains("data-block=\""));
        assert!(!html.contains(DEFAULT_ID_ATTR));
        assert_ne!(node.id(), NodeId::detached());
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        let html = render_node(&Node::image("x.png\" onerror=\"y"), &RenderConfig::PROD);
        assert!(html.contains(r#"src="x.png&quot; onerror=&quot;y""#));
    }
}

//! Visible text flattening
//!
//! Parses markup with `scraper` and keeps only text a reader would see:
//! `script`, `style`, `meta` and `noscript` subtrees are skipped, each
//! remaining text node is trimmed, empty nodes are dropped, and the rest
//! are joined with a single space.

use scraper::{Html, Node};

/// Elements whose content never reaches the rendered page
pub const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "meta", "noscript"];

/// Flatten an HTML document to its visible text
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    // Depth-first, children pushed in reverse so text keeps document order.
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(element) if HIDDEN_ELEMENTS.contains(&element.name()) => {}
            Node::Document | Node::Fragment | Node::Element(_) => {
                stack.extend(node.children().rev());
            }
            _ => {}
        }
    }

    parts.join(" ")
}

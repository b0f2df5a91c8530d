//! HTML content extraction: strips boilerplate subtrees and returns plain text.
//!
//! Parses raw HTML into a document tree, drops every `<script>`, `<style>`,
//! `<nav>`, `<header>` and `<footer>` element together with its entire
//! subtree, and joins the remaining text nodes into single-spaced text.

use scraper::{Html, Node};

/// Elements removed with their whole subtree before text is collected.
pub const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Extract normalised plain text from raw HTML.
///
/// Text nodes are visited in document order and joined with single spaces;
/// every run of whitespace (spaces, tabs, newlines) then collapses to one
/// space and the result is trimmed. Comments and doctypes are ignored.
///
/// This is a pure function. Malformed markup is repaired by the HTML5
/// parser rather than rejected, so the worst case is an empty string.
pub fn extract(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut fragments: Vec<&str> = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) if is_stripped(element.name()) => continue,
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    fragments.push(trimmed);
                }
            }
            _ => {}
        }
        // Reverse so the leftmost child is popped first.
        stack.extend(node.children().rev());
    }

    normalise_whitespace(&fragments.join(" "))
}

fn is_stripped(name: &str) -> bool {
    STRIPPED_ELEMENTS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to at most `max_bytes`, breaking at a char boundary.
pub fn truncate_to_limit(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }

    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].trim_end()
}

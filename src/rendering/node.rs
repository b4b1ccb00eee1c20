// src/rendering/node.rs
//! Render tree and its HTML serialization.

use super::fallback;
use indexmap::IndexMap;
use std::fmt::Write;

/// Output for one block, or part of one.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Element(Element),
    Text(String),
    /// Nothing to show; serializes to nothing.
    Empty,
    /// A kind the site does not render, shown as a named placeholder.
    Unsupported { kind: String },
    /// A block that could not be rendered, shown as a generic placeholder.
    Failed,
    /// Several sibling nodes, e.g. a placeholder followed by its children.
    Fragment(Vec<RenderNode>),
}

impl RenderNode {
    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::Text(content.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RenderNode::Empty => true,
            RenderNode::Fragment(nodes) => nodes.iter().all(RenderNode::is_empty),
            _ => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            RenderNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Serializes this node as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            RenderNode::Element(element) => element.write_html(out),
            RenderNode::Text(text) => out.push_str(&escape_text(text)),
            RenderNode::Empty => {}
            RenderNode::Unsupported { kind } => fallback::unsupported_element(kind).write_html(out),
            RenderNode::Failed => fallback::fault_element().write_html(out),
            RenderNode::Fragment(nodes) => nodes.iter().for_each(|node| node.write_html(out)),
        }
    }

    /// Concatenated text content, without markup.
    pub fn text_content(&self) -> String {
        match self {
            RenderNode::Element(element) => element.text_content(),
            RenderNode::Text(text) => text.clone(),
            RenderNode::Fragment(nodes) => nodes.iter().map(RenderNode::text_content).collect(),
            RenderNode::Unsupported { .. } | RenderNode::Failed | RenderNode::Empty => {
                String::new()
            }
        }
    }
}

impl From<Element> for RenderNode {
    fn from(element: Element) -> Self {
        RenderNode::Element(element)
    }
}

/// An HTML element. Attributes keep insertion order; a `None` value is a
/// boolean attribute written by name only.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: IndexMap<&'static str, Option<String>>,
    pub children: Vec<RenderNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, Some(value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.insert(name, None);
        self
    }

    pub fn child(mut self, node: impl Into<RenderNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(|value| value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(RenderNode::text_content).collect()
    }

    /// Void elements cannot hold children.
    pub fn is_void(&self) -> bool {
        is_void_element(self.tag)
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            match value {
                Some(value) => {
                    // Writing to a String cannot fail.
                    let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                }
                None => {
                    out.push(' ');
                    out.push_str(name);
                }
            }
        }
        out.push('>');

        if is_void_element(self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Serializes a node sequence in order.
pub fn render_html(nodes: &[RenderNode]) -> String {
    let mut out = String::with_capacity(nodes.len() * crate::constants::CHARS_PER_BLOCK_ESTIMATE);
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

fn is_void_element(tag: &str) -> bool {
    matches!(tag, "hr" | "img" | "input" | "br" | "meta" | "link")
}

/// Escape HTML special characters in text content.
pub fn escape_text(s: &str) -> String {
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
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn elements_serialize_with_escaped_content() {
        let node: RenderNode = Element::new("p")
            .class("my-4")
            .child(RenderNode::text("a < b & \"c\""))
            .into();
        assert_eq!(node.to_html(), "<p class=\"my-4\">a &lt; b &amp; \"c\"</p>");
    }

    #[test]
    fn attributes_keep_order_and_escape_quotes() {
        let node: RenderNode = Element::new("a")
            .attr("href", "https://x.example/?a=1&b=\"2\"")
            .class("text-primary")
            .into();
        assert_eq!(
            node.to_html(),
            "<a href=\"https://x.example/?a=1&amp;b=&quot;2&quot;\" class=\"text-primary\"></a>"
        );
    }

    #[test]
    fn void_and_boolean_attributes() {
        let node: RenderNode = Element::new("input")
            .attr("type", "checkbox")
            .flag("disabled")
            .flag("checked")
            .into();
        assert_eq!(node.to_html(), "<input type=\"checkbox\" disabled checked>");
    }

    #[test]
    fn empty_and_fragments() {
        assert_eq!(RenderNode::Empty.to_html(), "");
        let fragment = RenderNode::Fragment(vec![
            RenderNode::Empty,
            RenderNode::text("x"),
            Element::new("hr").into(),
        ]);
        assert_eq!(fragment.to_html(), "x<hr>");
        assert!(!fragment.is_empty());
        assert!(RenderNode::Fragment(vec![RenderNode::Empty]).is_empty());
    }
}

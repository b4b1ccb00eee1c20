// src/rendering/fallback.rs
//! What to show when a block cannot be shown.
//!
//! Three dispositions, each textually distinct in the output:
//! nothing at all, a placeholder naming an unknown kind, or a generic
//! error placeholder.

use super::node::{Element, RenderNode};
use super::RenderError;
use crate::model::Block;

pub const PLACEHOLDER_CLASS: &str = "text-gray-500 my-4";
pub const UNSUPPORTED_PREFIX: &str = "Desteklenmeyen blok tipi: ";
pub const FAULT_MESSAGE: &str = "Bu içerik gösterilemiyor";

/// How a block that did not produce content is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Recognized kind with nothing to show.
    SilentEmpty,
    /// Kind outside the rendered set.
    VisibleUnsupported,
    /// Decode or mapping fault.
    VisibleError,
}

impl Disposition {
    pub fn of(node: &RenderNode) -> Option<Self> {
        match node {
            RenderNode::Empty => Some(Disposition::SilentEmpty),
            RenderNode::Unsupported { .. } => Some(Disposition::VisibleUnsupported),
            RenderNode::Failed => Some(Disposition::VisibleError),
            _ => None,
        }
    }
}

/// Placeholder for an unknown kind.
pub fn unsupported(kind: &str) -> RenderNode {
    log::debug!("Unsupported block type: {}", kind);
    RenderNode::Unsupported {
        kind: kind.to_string(),
    }
}

/// Placeholder for a block that failed, logged with its kind and id.
pub fn fault(block: &Block, error: &RenderError) -> RenderNode {
    log::error!(
        "Error rendering block {} of type {}: {}",
        block.id(),
        block.kind(),
        error
    );
    RenderNode::Failed
}

pub(crate) fn unsupported_element(kind: &str) -> Element {
    Element::new("div")
        .class(PLACEHOLDER_CLASS)
        .child(RenderNode::text(format!("{}{}", UNSUPPORTED_PREFIX, kind)))
}

pub(crate) fn fault_element() -> Element {
    Element::new("div")
        .class(PLACEHOLDER_CLASS)
        .child(RenderNode::text(FAULT_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholders_are_distinct() {
        assert_eq!(
            unsupported("unknown_block_xyz").to_html(),
            "<div class=\"text-gray-500 my-4\">Desteklenmeyen blok tipi: unknown_block_xyz</div>"
        );
        assert_eq!(
            RenderNode::Failed.to_html(),
            "<div class=\"text-gray-500 my-4\">Bu içerik gösterilemiyor</div>"
        );
        assert_eq!(RenderNode::Empty.to_html(), "");
    }

    #[test]
    fn dispositions() {
        assert_eq!(Disposition::of(&RenderNode::Empty), Some(Disposition::SilentEmpty));
        assert_eq!(
            Disposition::of(&unsupported("x")),
            Some(Disposition::VisibleUnsupported)
        );
        assert_eq!(Disposition::of(&RenderNode::Failed), Some(Disposition::VisibleError));
        assert_eq!(Disposition::of(&RenderNode::text("x")), None);
    }

    #[test]
    fn unknown_kind_name_is_escaped() {
        assert_eq!(
            unsupported("<script>").to_html(),
            "<div class=\"text-gray-500 my-4\">Desteklenmeyen blok tipi: &lt;script&gt;</div>"
        );
    }
}

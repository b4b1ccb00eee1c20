// src/rendering/rich_text.rs
//! Inline rendering of styled text runs.

use super::node::{Element, RenderNode};
use crate::types::{Annotations, RichTextItem};

const LINK_CLASS: &str = "text-primary hover:underline";

/// Classes for a run's annotations, one per set flag, in a fixed order.
pub fn annotation_classes(annotations: &Annotations) -> Vec<String> {
    let flags = [
        (annotations.bold, "font-bold"),
        (annotations.code, "font-mono bg-gray-100 rounded px-1"),
        (annotations.italic, "italic"),
        (annotations.strikethrough, "line-through"),
        (annotations.underline, "underline"),
    ];

    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, class)| class.to_string())
        .chain(annotations.color.text_class())
        .collect()
}

/// One inline node for a run: a link or a span.
pub fn render_run(item: &RichTextItem) -> RenderNode {
    let classes = annotation_classes(&item.annotations).join(" ");
    let content = RenderNode::text(item.content.as_str());

    let element = match &item.link {
        Some(link) => {
            let class = if classes.is_empty() {
                LINK_CLASS.to_string()
            } else {
                format!("{} {}", LINK_CLASS, classes)
            };
            Element::new("a").attr("href", link.url.as_str()).class(class)
        }
        None if classes.is_empty() => Element::new("span"),
        None => Element::new("span").class(classes),
    };

    element.child(content).into()
}

/// One inline node per run, in order.
pub fn render_rich_text(items: &[RichTextItem]) -> Vec<RenderNode> {
    items.iter().map(render_run).collect()
}

// src/rendering/decoder.rs
//! Maps one typed block to its render node.

use super::fallback;
use super::node::{Element, RenderNode};
use super::rich_text::render_rich_text;
use super::toc::heading_anchor;
use super::RenderError;
use crate::media::{self, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::model::*;
use crate::types::plain_text_of;

/// Settings the block mapping needs from the site.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub image_proxy_base: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(image_proxy_base: &'a str) -> Self {
        Self { image_proxy_base }
    }
}

pub const BULLETED_ITEM_CLASS: &str = "list-disc";
pub const NUMBERED_ITEM_CLASS: &str = "list-decimal";

/// Produces exactly one node for `block`, without its children.
///
/// Kinds outside the rendered set give the unsupported placeholder; a
/// malformed block is an error for the caller to turn into the fault
/// placeholder.
pub fn block_node(block: &Block, ctx: &RenderContext) -> Result<RenderNode, RenderError> {
    let node = match block {
        Block::Paragraph(b) => text_element("p", "my-4", &b.content),
        Block::Heading1(b) => heading("h1", "text-3xl font-bold mt-8 mb-4", b),
        Block::Heading2(b) => heading("h2", "text-2xl font-bold mt-8 mb-4 font-mulish", b),
        Block::Heading3(b) => heading("h3", "text-xl font-bold mt-6 mb-3 font-mulish", b),
        Block::BulletedListItem(b) => text_element("li", BULLETED_ITEM_CLASS, &b.content),
        Block::NumberedListItem(b) => text_element("li", NUMBERED_ITEM_CLASS, &b.content),
        Block::ToDo(b) => to_do(b),
        Block::Toggle(b) => Element::new("details").class("mb-4").child(
            Element::new("summary")
                .class("font-medium cursor-pointer")
                .children(render_rich_text(&b.content.rich_text)),
        ),
        Block::Quote(b) => {
            text_element("blockquote", "border-l-4 border-gray-300 pl-4 py-2 my-6 italic", &b.content)
        }
        Block::Callout(b) => callout(b),
        Block::Code(b) => code(b),
        Block::Divider(_) => Element::new("hr").class("my-8"),
        Block::Image(b) => match image(b, ctx) {
            Some(element) => element,
            None => return Ok(RenderNode::Empty),
        },
        Block::Embed(b) => match embed(b, ctx) {
            Some(element) => element,
            None => return Ok(RenderNode::Empty),
        },
        Block::Unsupported(b) => return Ok(fallback::unsupported(&b.block_type)),
        Block::Malformed(b) => {
            return Err(RenderError::Malformed {
                kind: b.block_type.clone(),
                reason: b.reason.clone(),
            })
        }
    };
    Ok(node.into())
}

fn text_element(tag: &'static str, class: &str, content: &TextBlockContent) -> Element {
    Element::new(tag)
        .class(class)
        .children(render_rich_text(&content.rich_text))
}

/// Headings show plain text; the anchor comes from the first run.
fn heading(tag: &'static str, class: &str, block: &HeadingBlock) -> Element {
    let runs = &block.content.rich_text;
    let mut element = Element::new(tag);
    if let Some(anchor) = heading_anchor(runs) {
        element = element.attr("id", anchor);
    }
    let element = element.class(class);
    if runs.is_empty() {
        element
    } else {
        element.child(RenderNode::text(plain_text_of(runs)))
    }
}

fn to_do(block: &ToDoBlock) -> Element {
    let mut checkbox = Element::new("input").attr("type", "checkbox").flag("disabled");
    if block.checked {
        checkbox = checkbox.flag("checked");
    }
    Element::new("div")
        .class("flex items-center space-x-2 mb-2")
        .child(checkbox)
        .child(Element::new("label").children(render_rich_text(&block.content.rich_text)))
}

fn callout(block: &CalloutBlock) -> Element {
    let mut element = Element::new("div").class("bg-gray-100 p-4 rounded-lg my-6 flex items-start");
    if let Some(emoji) = block.icon.as_ref().and_then(Icon::emoji) {
        element = element.child(
            Element::new("div")
                .class("mr-4 text-2xl")
                .child(RenderNode::text(emoji)),
        );
    }
    element.child(Element::new("div").children(render_rich_text(&block.content.rich_text)))
}

/// Code keeps the runs' plain text and drops their styling.
fn code(block: &CodeBlock) -> Element {
    let mut code = Element::new("code");
    if let Some(language) = block.language.as_deref().filter(|l| !l.is_empty()) {
        code = code.class(format!("language-{}", language.replace(' ', "-")));
    }
    Element::new("pre")
        .class("bg-gray-100 p-4 rounded-lg my-6 overflow-x-auto")
        .child(code.child(RenderNode::text(plain_text_of(&block.content.rich_text))))
}

fn image(block: &ImageBlock, ctx: &RenderContext) -> Option<Element> {
    let source = block.source.as_ref()?.url();
    let src = media::resized_or_raw(ctx.image_proxy_base, source, IMAGE_WIDTH, IMAGE_HEIGHT);
    let caption = block.caption_text();

    let img = Element::new("img")
        .attr("src", src)
        .attr("alt", caption.clone().unwrap_or_else(|| "Görsel".to_string()))
        .class("w-full rounded-lg object-cover")
        .attr("loading", "lazy");

    let mut figure = Element::new("figure").class("my-8").child(img);
    if let Some(caption) = caption {
        figure = figure.child(
            Element::new("figcaption")
                .class("text-center text-sm text-gray-500 mt-2")
                .child(RenderNode::text(caption)),
        );
    }
    Some(figure)
}

/// Video hosts get a player; anything else is an outbound link whose
/// target goes through the image proxy when the URL carries a key.
fn embed(block: &EmbedBlock, ctx: &RenderContext) -> Option<Element> {
    let url = block.url.as_deref()?;

    Some(match media::video_embed_url(url) {
        Some(player) => Element::new("div").class("my-8 aspect-video").child(
            Element::new("iframe")
                .attr("src", player)
                .class("w-full h-full rounded-lg")
                .attr("title", "YouTube video")
                .flag("allowfullscreen"),
        ),
        None => Element::new("div").class("my-8").child(
            Element::new("a")
                .attr("href", block.preview_url(ctx.image_proxy_base)?)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class("text-primary hover:underline")
                .child(RenderNode::text(url)),
        ),
    })
}

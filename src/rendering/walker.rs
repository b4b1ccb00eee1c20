// src/rendering/walker.rs
//! Depth-first walk over a block tree.

use super::decoder::{block_node, RenderContext, BULLETED_ITEM_CLASS, NUMBERED_ITEM_CLASS};
use super::fallback;
use super::node::{Element, RenderNode};
use crate::model::Block;

const TOGGLE_CHILDREN_CLASS: &str = "pl-4 mt-2";
const NESTED_CHILDREN_CLASS: &str = "pl-4";
const LIST_CLASS: &str = "my-4 pl-6";

/// Renders a block sequence, one node per block, in order.
pub fn render_blocks(blocks: &[Block], ctx: &RenderContext) -> Vec<RenderNode> {
    blocks.iter().map(|block| render_block(block, ctx)).collect()
}

/// Renders a block and, pre-order, everything below it.
///
/// A fault in this block is contained here; siblings and children still
/// render.
pub fn render_block(block: &Block, ctx: &RenderContext) -> RenderNode {
    let own = block_node(block, ctx).unwrap_or_else(|err| fallback::fault(block, &err));
    let children = group_list_items(render_blocks(block.children(), ctx));

    match own {
        RenderNode::Element(element) if matches!(block, Block::Toggle(_)) => element
            .child(container(TOGGLE_CHILDREN_CLASS, children))
            .into(),
        own if children.is_empty() => own,
        RenderNode::Element(element) if holds_block_children(element.tag) => element
            .child(container(NESTED_CHILDREN_CLASS, children))
            .into(),
        // Phrasing-only parents (`p`, headings, `blockquote`) cannot hold a
        // `div`; the children follow them instead.
        RenderNode::Element(element) if !element.is_void() => RenderNode::Fragment(vec![
            element.into(),
            container(NESTED_CHILDREN_CLASS, children).into(),
        ]),
        own => RenderNode::Fragment(std::iter::once(own).chain(children).collect()),
    }
}

fn container(class: &str, children: Vec<RenderNode>) -> Element {
    Element::new("div").class(class).children(children)
}

fn holds_block_children(tag: &str) -> bool {
    matches!(tag, "details" | "li" | "div")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn of(node: &RenderNode) -> Option<Self> {
        let element = node.as_element().filter(|e| e.tag == "li")?;
        match element.get_attr("class") {
            Some(BULLETED_ITEM_CLASS) => Some(ListKind::Bulleted),
            Some(NUMBERED_ITEM_CLASS) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    fn wrapper(self) -> Element {
        match self {
            ListKind::Bulleted => Element::new("ul"),
            ListKind::Numbered => Element::new("ol"),
        }
        .class(LIST_CLASS)
    }
}

/// Wraps each run of consecutive list items of one kind in a `ul` or `ol`.
/// Every other node passes through untouched and in place.
pub fn group_list_items(nodes: Vec<RenderNode>) -> Vec<RenderNode> {
    let mut grouped = Vec::with_capacity(nodes.len());
    let mut open: Option<(ListKind, Element)> = None;

    for node in nodes {
        match (ListKind::of(&node), open.take()) {
            (Some(kind), Some((current, list))) if kind == current => {
                open = Some((kind, list.child(node)));
            }
            (Some(kind), previous) => {
                if let Some((_, list)) = previous {
                    grouped.push(list.into());
                }
                open = Some((kind, kind.wrapper().child(node)));
            }
            (None, previous) => {
                if let Some((_, list)) = previous {
                    grouped.push(list.into());
                }
                grouped.push(node);
            }
        }
    }
    if let Some((_, list)) = open {
        grouped.push(list.into());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::{BlockId, RichTextItem};
    use pretty_assertions::assert_eq;

    fn ctx() -> RenderContext<'static> {
        RenderContext::new("https://gallery.example/api/image")
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn toggle(text: &str, children: Vec<Block>) -> Block {
        Block::Toggle(ToggleBlock {
            common: BlockCommon::default().with_children(children),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn list_item(text: &str, numbered: bool) -> Block {
        let item = ListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        };
        if numbered {
            Block::NumberedListItem(item)
        } else {
            Block::BulletedListItem(item)
        }
    }

    fn toggle_body(node: &RenderNode) -> &Element {
        let details = node.as_element().unwrap();
        details.children.last().and_then(RenderNode::as_element).unwrap()
    }

    #[test]
    fn toggle_without_children_has_empty_container() {
        let node = render_block(&toggle("Detaylar", vec![]), &ctx());
        assert_eq!(
            node.to_html(),
            "<details class=\"mb-4\"><summary class=\"font-medium cursor-pointer\"><span>Detaylar</span></summary><div class=\"pl-4 mt-2\"></div></details>"
        );
    }

    #[test]
    fn toggle_children_keep_order() {
        let node = render_block(
            &toggle("T", vec![paragraph("1"), paragraph("2"), paragraph("3")]),
            &ctx(),
        );
        let texts: Vec<String> = toggle_body(&node)
            .children
            .iter()
            .map(RenderNode::text_content)
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn text_parents_are_followed_by_their_children() {
        let mut parent = paragraph("ana");
        parent.set_children(vec![paragraph("alt")]);
        assert_eq!(
            render_block(&parent, &ctx()).to_html(),
            "<p class=\"my-4\"><span>ana</span></p><div class=\"pl-4\"><p class=\"my-4\"><span>alt</span></p></div>"
        );

        let mut heading = Block::Heading2(HeadingBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("Başlık")]),
        });
        heading.set_children(vec![paragraph("alt")]);
        let node = render_block(&heading, &ctx());
        let RenderNode::Fragment(parts) = &node else {
            panic!("expected heading and children side by side");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].as_element().map(|e| e.tag), Some("h2"));
        assert!(parts[0].as_element().unwrap().children.iter().all(|c| c.as_element().is_none()));
    }

    #[test]
    fn list_items_keep_their_children_inside() {
        let mut item = list_item("üst", false);
        item.set_children(vec![list_item("alt", false)]);
        assert_eq!(
            render_block(&item, &ctx()).to_html(),
            "<li class=\"list-disc\"><span>üst</span><div class=\"pl-4\"><ul class=\"my-4 pl-6\"><li class=\"list-disc\"><span>alt</span></li></ul></div></li>"
        );
    }

    #[test]
    fn consecutive_list_items_share_a_list() {
        let blocks = vec![
            list_item("a", false),
            list_item("b", false),
            list_item("1", true),
            paragraph("ara"),
            list_item("c", false),
        ];
        let nodes = render_blocks(&blocks, &ctx());
        assert_eq!(nodes.len(), 5);

        let grouped = group_list_items(nodes);
        let tags: Vec<&str> = grouped
            .iter()
            .filter_map(|n| n.as_element().map(|e| e.tag))
            .collect();
        assert_eq!(tags, vec!["ul", "ol", "p", "ul"]);
        assert_eq!(grouped[0].as_element().unwrap().children.len(), 2);
        assert_eq!(
            grouped[1].to_html(),
            "<ol class=\"my-4 pl-6\"><li class=\"list-decimal\"><span>1</span></li></ol>"
        );
    }

    #[test]
    fn placeholder_children_follow_as_fragment() {
        let mut unknown = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "column_list".into(),
        });
        unknown.set_children(vec![paragraph("içerik")]);

        let node = render_block(&unknown, &ctx());
        assert_eq!(
            node.to_html(),
            "<div class=\"text-gray-500 my-4\">Desteklenmeyen blok tipi: column_list</div><p class=\"my-4\"><span>içerik</span></p>"
        );

        let mut divider = Block::Divider(DividerBlock::default());
        divider.set_children(vec![paragraph("x")]);
        assert!(matches!(render_block(&divider, &ctx()), RenderNode::Fragment(_)));
    }

    #[test]
    fn fault_is_isolated_to_its_block() {
        let blocks = vec![
            paragraph("önce"),
            Block::Malformed(MalformedBlock {
                common: BlockCommon::new(BlockId::from_raw("bad")),
                block_type: "callout".into(),
                reason: "payload is a number, expected an object".into(),
            }),
            paragraph("sonra"),
        ];
        let nodes = render_blocks(&blocks, &ctx());
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], RenderNode::Failed);
        assert_eq!(nodes[2].text_content(), "sonra");
    }
}

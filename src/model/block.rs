use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Unsupported($pattern) => $result,
            Block::Malformed($pattern) => $result,
        }
    };
}

/// One content block of a page, closed over the kinds the site renders.
///
/// `Unsupported` carries kinds outside that set; `Malformed` carries blocks
/// of a known kind whose payload could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Divider(DividerBlock),
    Image(ImageBlock),
    Embed(EmbedBlock),
    Unsupported(UnsupportedBlock),
    Malformed(MalformedBlock),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn children(&self) -> &[Block] {
        &self.common().children
    }

    /// True when the block owns children, whether or not they were fetched.
    pub fn has_children(&self) -> bool {
        let common = self.common();
        common.has_children || !common.children.is_empty()
    }

    pub fn set_children(&mut self, children: Vec<Block>) {
        let common = self.common_mut();
        common.has_children = common.has_children || !children.is_empty();
        common.children = children;
    }

    /// Upstream kind tag, e.g. `heading_1`. Unsupported and malformed
    /// blocks report the tag they arrived with.
    pub fn kind(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Divider(_) => "divider",
            Block::Image(_) => "image",
            Block::Embed(_) => "embed",
            Block::Unsupported(b) => &b.block_type,
            Block::Malformed(b) => &b.block_type,
        }
    }

    /// Heading level for heading blocks
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading1(_) => Some(1),
            Block::Heading2(_) => Some(2),
            Block::Heading3(_) => Some(3),
            _ => None,
        }
    }

    /// The run sequence of rich-text kinds
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) | Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }
}

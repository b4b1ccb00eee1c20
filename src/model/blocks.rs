use super::common::BlockCommon;
use crate::media::{self, EMBED_HEIGHT, EMBED_WIDTH};
use crate::types::{plain_text_of, Color, RichTextItem};

/// Text payload shared by every rich-text kind. An absent `rich_text`
/// upstream decodes to an empty sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            color: Color::Default,
        }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading block, shared by the three heading levels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Bulleted or numbered list item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Icon of a callout or a page
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(String),
    External { url: String },
    File { url: String },
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji(emoji) => Some(emoji),
            _ => None,
        }
    }
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: Option<String>,
    pub content: TextBlockContent,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Image block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub source: Option<FileObject>,
    pub caption: Vec<RichTextItem>,
}

impl ImageBlock {
    /// Caption text, `None` when there is nothing to show.
    pub fn caption_text(&self) -> Option<String> {
        let text = plain_text_of(&self.caption);
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Where a file lives, selected by the `type` discriminator upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FileObject {
    External { url: String },
    Hosted { url: String, expiry_time: Option<String> },
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { url } => url,
            FileObject::Hosted { url, .. } => url,
        }
    }
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: Option<String>,
    pub caption: Vec<RichTextItem>,
}

impl EmbedBlock {
    /// Resized preview through the image proxy, or the raw URL when it
    /// carries no `key=` parameter.
    pub fn preview_url(&self, proxy_base: &str) -> Option<String> {
        self.url
            .as_deref()
            .map(|url| media::resized_or_raw(proxy_base, url, EMBED_WIDTH, EMBED_HEIGHT))
    }
}

/// A kind this site does not render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// A recognised kind whose payload had an unexpected shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MalformedBlock {
    pub common: BlockCommon,
    pub block_type: String,
    pub reason: String,
}

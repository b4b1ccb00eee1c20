// src/types/rich_text.rs
//! Styled inline text as carried by block payloads and page properties.

use super::Color;
use serde::{Deserialize, Serialize};

/// Link destination of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Independent style flags of a run. Any subset may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// One styled fragment of inline text.
///
/// `content` is what gets rendered; `plain_text` is Notion's flattened
/// rendering of the run and is what slugs and titles are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub content: String,
    pub link: Option<Link>,
    pub annotations: Annotations,
    pub plain_text: String,
}

impl RichTextItem {
    /// Create an unstyled run.
    pub fn plain_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            link: None,
            annotations: Annotations::default(),
            plain_text: text.to_string(),
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(Link { url: url.into() });
        self
    }

    pub fn bold(self) -> Self {
        let annotations = Annotations {
            bold: true,
            ..self.annotations
        };
        self.with_annotations(annotations)
    }
}

/// Concatenated plain text of a run sequence.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// Plain text of the first run, the convention used for titles and anchors.
pub fn first_plain_text(items: &[RichTextItem]) -> Option<&str> {
    items.first().map(|item| item.plain_text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_concatenates_in_order() {
        let items = vec![
            RichTextItem::plain_text("Zey"),
            RichTextItem::plain_text("nep").bold(),
        ];
        assert_eq!(plain_text_of(&items), "Zeynep");
        assert_eq!(first_plain_text(&items), Some("Zey"));
        assert_eq!(first_plain_text(&[]), None);
    }

    #[test]
    fn bold_keeps_other_flags() {
        let item = RichTextItem::plain_text("x")
            .with_annotations(Annotations {
                italic: true,
                ..Annotations::default()
            })
            .bold();
        assert!(item.annotations.bold);
        assert!(item.annotations.italic);
    }
}

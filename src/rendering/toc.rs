// src/rendering/toc.rs
//! Table of contents from heading blocks.

use crate::model::Block;
use crate::slug::slugify;
use crate::types::{first_plain_text, plain_text_of, RichTextItem};
use serde::Serialize;

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

impl TocEntry {
    /// Indentation class for the entry's level.
    pub fn indent_class(&self) -> &'static str {
        match self.level {
            1 => "",
            2 => "pl-4",
            _ => "pl-8",
        }
    }
}

/// Anchor id of a heading: the slug of its first run's plain text.
pub fn heading_anchor(runs: &[RichTextItem]) -> Option<String> {
    first_plain_text(runs)
        .map(slugify)
        .filter(|anchor| !anchor.is_empty())
}

/// Headings in document order, including headings nested in children.
/// Headings without an anchor are left out since nothing can link to them.
pub fn table_of_contents(blocks: &[Block]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    collect_headings_recursive(blocks, &mut entries);
    entries
}

fn collect_headings_recursive(blocks: &[Block], entries: &mut Vec<TocEntry>) {
    for block in blocks {
        if let (Some(level), Some(runs)) = (block.heading_level(), block.rich_text()) {
            let text = plain_text_of(runs);
            if let Some(anchor) = heading_anchor(runs).filter(|_| !text.trim().is_empty()) {
                entries.push(TocEntry {
                    level,
                    text: text.trim().to_string(),
                    anchor,
                });
            }
        }

        if block.has_children() {
            collect_headings_recursive(block.children(), entries);
        }
    }
}

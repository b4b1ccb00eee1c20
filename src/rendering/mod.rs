//! Block rendering: typed blocks in, escaped HTML out.
//!
//! The pipeline is pure. [`walker`] descends the block tree, [`decoder`]
//! maps each block to one [`RenderNode`], [`rich_text`] renders inline runs
//! for every text kind, and [`fallback`] decides what a block that cannot
//! be shown turns into.

pub mod decoder;
pub mod fallback;
pub mod node;
pub mod rich_text;
pub mod toc;
pub mod walker;

use crate::model::Block;
use thiserror::Error;

pub use decoder::{block_node, RenderContext};
pub use fallback::Disposition;
pub use node::{render_html, Element, RenderNode};
pub use toc::{table_of_contents, TocEntry};
pub use walker::{group_list_items, render_block, render_blocks};

/// Why a single block could not be mapped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("malformed {kind} block: {reason}")]
    Malformed { kind: String, reason: String },
}

/// Renders a block tree straight to an HTML fragment, list items grouped
/// into their lists.
pub fn render_page(blocks: &[Block], ctx: &RenderContext) -> String {
    render_html(&group_list_items(render_blocks(blocks, ctx)))
}

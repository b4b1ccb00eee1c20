mod block;
pub mod blocks;
pub mod common;
pub mod entry;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use entry::{Entry, Tag};

// src/lib.rs
//! minikadlar library: a Turkish baby-name and blog site rendered from a
//! Notion workspace.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `RenderError`
//! - **Configuration**: `CommandLineInput`, `SiteConfig`, `SiteIdentity`
//! - **Domain model**: `Block` and its payloads, `Entry`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `CachedNotionClient`
//! - **Rendering**: `render_blocks`, `render_page`, `RenderNode`, `table_of_contents`
//! - **Site**: `Site`, `Page`, the alphabet table and `slugify`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod media;
pub mod model;
pub mod rendering;
pub mod server;
pub mod site;
pub mod slug;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::rendering::RenderError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{resolve_api_key, Command, CommandLineInput, SiteConfig, SiteIdentity};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Entry, Tag};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, Color, DatabaseId, Link, NotionId, PageId, RichTextItem, SiteUrl,
};

// --- API Client ---
pub use crate::api::{
    connect, fetch_block_tree, find_name_by_slug, CachedNotionClient, DatabaseQuery,
    NotionContentClient, NotionHttpClient, NotionRepository, NotionTransport,
};

// --- Rendering ---
pub use crate::rendering::{
    render_blocks, render_html, render_page, table_of_contents, Element, RenderContext,
    RenderNode, TocEntry,
};

// --- Site ---
pub use crate::site::{Alphabet, Gender, Letter, Page, Site};
pub use crate::slug::slugify;

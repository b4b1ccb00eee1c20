// src/constants.rs
//! Domain constants that define the operational boundaries of the site.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them should tell you how the site talks to Notion and how much it shows.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Pinned API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Maximum nesting depth when expanding block children.
///
/// Toggles inside toggles are rare past three levels; the cap only
/// guards against runaway fetches.
pub const BLOCK_MAX_FETCH_DEPTH: usize = 8;

/// Upper bound on cursor pages followed for a single listing.
pub const MAX_PAGINATION_PAGES: u32 = 50;

// ---------------------------------------------------------------------------
// Revalidation
// ---------------------------------------------------------------------------

/// Seconds a cached upstream response stays fresh.
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

/// Distinct upstream requests remembered by the revalidation cache.
pub const CACHE_CAPACITY: usize = 512;

// ---------------------------------------------------------------------------
// Listing sizes
// ---------------------------------------------------------------------------

/// Posts shown on the home page and the blog index.
pub const LATEST_POSTS_PAGE_SIZE: u32 = 12;

/// Names fetched for the name index and the letter pages.
pub const NAMES_PAGE_SIZE: u32 = 100;

/// Cards in the "related" strip under a detail page.
pub const RELATED_ITEM_COUNT: usize = 3;

/// Detail pages with fewer blocks than this also show the fact box.
pub const NAME_FACTS_MIN_BLOCKS: usize = 2;

// ---------------------------------------------------------------------------
// SEO
// ---------------------------------------------------------------------------

/// Maximum characters of a meta description before the ellipsis.
pub const SEO_DESCRIPTION_MAX_CHARS: usize = 160;

/// Default public origin of the site.
pub const DEFAULT_SITE_URL: &str = "https://minikadlar.com";

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

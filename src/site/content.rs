// src/site/content.rs
//! Content lookups shared by the page handlers.
//!
//! Listing lookups never fail: an upstream error is logged and the listing
//! comes back empty. Detail lookups return the error so the page can say
//! the content could not be loaded.

use super::alphabet::{Gender, Letter};
use crate::api::{DatabaseQuery, NotionRepository};
use crate::error::AppError;
use crate::model::{Entry, Tag};
use crate::slug::slugify;
use crate::types::DatabaseId;

/// Runs a listing query, degrading to an empty listing on failure.
pub async fn listing(
    repo: &dyn NotionRepository,
    database: &DatabaseId,
    query: &DatabaseQuery,
    what: &str,
) -> Vec<Entry> {
    match repo.query_database(database, query).await {
        Ok(entries) => {
            log::debug!("Loaded {} {}", entries.len(), what);
            entries
        }
        Err(err) => {
            log::warn!("Could not load {}, showing an empty listing: {}", what, err);
            Vec::new()
        }
    }
}

/// Boy and girl names of one letter.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterListing {
    pub letter: Letter,
    pub boys: Vec<Entry>,
    pub girls: Vec<Entry>,
}

impl LetterListing {
    pub fn is_empty(&self) -> bool {
        self.boys.is_empty() && self.girls.is_empty()
    }

    pub fn names(&self, gender: Gender) -> &[Entry] {
        match gender {
            Gender::Boy => &self.boys,
            Gender::Girl => &self.girls,
        }
    }
}

/// Fetches both genders of a letter concurrently.
pub async fn letter_listing(
    repo: &dyn NotionRepository,
    names: &DatabaseId,
    letter: Letter,
) -> LetterListing {
    let boys_query = DatabaseQuery::names_by_letter(&letter, Gender::Boy);
    let girls_query = DatabaseQuery::names_by_letter(&letter, Gender::Girl);
    let boys_label = format!("{} names", letter.gender_tag(Gender::Boy));
    let girls_label = format!("{} names", letter.gender_tag(Gender::Girl));

    let (boys, girls) = futures::join!(
        listing(repo, names, &boys_query, &boys_label),
        listing(repo, names, &girls_query, &girls_label),
    );

    LetterListing {
        letter,
        boys,
        girls,
    }
}

/// Loads every published post and picks the one at `/blog/<tag>/<slug>`.
///
/// Returns the full post list alongside, for the related-posts section.
pub async fn find_post(
    repo: &dyn NotionRepository,
    posts_database: &DatabaseId,
    tag: &str,
    slug: &str,
) -> Result<(Option<Entry>, Vec<Entry>), AppError> {
    let posts = repo
        .query_database(posts_database, &DatabaseQuery::all_published_posts())
        .await?;
    let tag = slugify(tag);
    let found = posts
        .iter()
        .find(|post| post.post_slug() == slug && post.tag_slug() == tag)
        .cloned();
    Ok((found, posts))
}

/// Posts whose first tag slugs to `tag_slug`.
pub fn posts_in_tag<'a>(posts: &'a [Entry], tag_slug: &str) -> Vec<&'a Entry> {
    posts.iter().filter(|post| post.tag_slug() == tag_slug).collect()
}

/// Every tag used by any post, first occurrence first, no repeats.
pub fn distinct_tags(posts: &[Entry]) -> Vec<&Tag> {
    let mut seen: Vec<&Tag> = Vec::new();
    for tag in posts.iter().flat_map(|post| post.tags.iter()) {
        if !seen.iter().any(|known| known.name == tag.name) {
            seen.push(tag);
        }
    }
    seen
}

/// `bebek-isimleri` → `Bebek Isimleri`, for breadcrumbs and headings.
pub fn tag_display_name(tag_slug: &str) -> String {
    tag_slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

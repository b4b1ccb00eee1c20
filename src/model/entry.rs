use crate::media;
use crate::slug::slugify;
use crate::types::{Color, PageId};
use chrono::{DateTime, NaiveDate, Utc};

/// Tag name used when a post has no tags
pub const UNCATEGORIZED: &str = "uncategorized";
/// Title used when a row has no title
pub const UNTITLED: &str = "Untitled";

/// A multi-select option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub color: Color,
}

/// One row of a Notion database: a blog post or a baby name.
///
/// Both databases share the same property vocabulary; properties a
/// database lacks simply stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub id: PageId,
    pub title: Option<String>,
    /// `Published.date.start` as sent (a date or an RFC 3339 timestamp)
    pub published: Option<String>,
    pub slug: Option<String>,
    pub tags: Vec<Tag>,
    pub description: Option<String>,
    /// `AI custom autofill`, the short teaser of a post
    pub summary: Option<String>,
    /// `URL` property of a name, the slug of its detail page
    pub url_slug: Option<String>,
    pub meaning: Option<String>,
    pub origin: Option<String>,
    pub gender: Option<String>,
    pub cover_url: Option<String>,
    pub icon_emoji: Option<String>,
    pub last_edited: Option<String>,
}

impl Entry {
    pub fn title_or_untitled(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Name of the first tag, the post's category.
    pub fn primary_tag(&self) -> &str {
        self.tags
            .first()
            .map(|t| t.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    pub fn tag_slug(&self) -> String {
        slugify(self.primary_tag())
    }

    pub fn post_slug(&self) -> String {
        slugify(self.title.as_deref().unwrap_or_default())
    }

    /// `/blog/<tag>/<slug>`
    pub fn post_path(&self) -> String {
        format!("/blog/{}/{}", self.tag_slug(), self.post_slug())
    }

    /// Slug of a name's detail page: the `URL` property, else the title.
    pub fn name_slug(&self) -> String {
        match self.url_slug.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_matches('/').to_string(),
            _ => slugify(self.title.as_deref().unwrap_or_default()),
        }
    }

    /// `/isim/<slug>`
    pub fn name_path(&self) -> String {
        format!("/isim/{}", self.name_slug())
    }

    /// Whether the name detail page for `slug` shows this row.
    pub fn matches_name_slug(&self, slug: &str) -> bool {
        if self.title.as_deref().map_or(true, str::is_empty) {
            return false;
        }
        let by_url = self
            .url_slug
            .as_deref()
            .is_some_and(|url| !url.is_empty() && url.contains(slug));
        by_url || self.post_slug() == slug
    }

    /// Proxy key of the cover image, or `default_key` when there is none.
    pub fn cover_key<'a>(&'a self, default_key: &'a str) -> &'a str {
        self.cover_url
            .as_deref()
            .and_then(media::extract_image_key)
            .unwrap_or(default_key)
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        self.published.as_deref().and_then(parse_notion_date)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_notion_datetime)
    }

    /// Description, falling back to the meaning for names.
    pub fn description_or_meaning(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.meaning.as_deref().filter(|m| !m.is_empty()))
    }
}

/// Parses a Notion date property start (`2024-03-15` or a timestamp).
pub fn parse_notion_date(raw: &str) -> Option<NaiveDate> {
    parse_notion_datetime(raw).map(|dt| dt.date_naive())
}

pub fn parse_notion_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

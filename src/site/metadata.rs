// src/site/metadata.rs
//! Per-page `<head>` data and text helpers for it.

use crate::constants::SEO_DESCRIPTION_MAX_CHARS;
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Everything the layout needs for the document head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Absolute canonical URL
    pub canonical: String,
    /// Open Graph type, `website` or `article`
    pub og_type: &'static str,
    pub image: Option<String>,
    pub published: Option<String>,
    pub modified: Option<String>,
    pub author: Option<String>,
    /// Serialized JSON-LD, safe to embed in a script element
    pub json_ld: Option<String>,
}

impl PageMetadata {
    pub fn website(
        title: impl Into<String>,
        description: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            canonical: canonical.into(),
            og_type: "website",
            image: None,
            published: None,
            modified: None,
            author: None,
            json_ld: None,
        }
    }

    pub fn article(
        title: impl Into<String>,
        description: impl Into<String>,
        canonical: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            og_type: "article",
            author: Some(author.into()),
            ..Self::website(title, description, canonical)
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_times(mut self, published: Option<String>, modified: Option<String>) -> Self {
        self.published = published;
        self.modified = modified;
        self
    }

    pub fn with_json_ld(mut self, graph: &Value) -> Self {
        self.json_ld = Some(script_safe_json(graph));
        self
    }
}

/// JSON text that cannot close the surrounding script element.
pub fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Strips markup and truncates to the description length, adding `...`
/// when something was cut.
pub fn seo_description(content: &str) -> String {
    truncate_description(content, SEO_DESCRIPTION_MAX_CHARS)
}

pub fn truncate_description(content: &str, max_chars: usize) -> String {
    lazy_static! {
        static ref TAG: Regex =
            Regex::new(r"<[^>]+>").expect("Failed to compile tag regex - this is a bug in the code");
    }

    let plain = TAG.replace_all(content, "");
    if plain.chars().count() <= max_chars {
        return plain.into_owned();
    }

    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// `15 Mart 2024`
pub fn format_date_tr(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        TURKISH_MONTHS[date.month0() as usize],
        date.year()
    )
}

// src/media.rs
//! Image proxy URLs and video embed rewriting.
//!
//! Uploaded images carry an opaque `key=` query parameter that the gallery
//! proxy understands; the proxy resizes on the fly given a width and height.

use regex::Regex;

/// Size of images inside article bodies and of cover images.
pub const IMAGE_WIDTH: u32 = 1200;
pub const IMAGE_HEIGHT: u32 = 800;

/// Size of embed previews.
pub const EMBED_WIDTH: u32 = 1200;
pub const EMBED_HEIGHT: u32 = 675;

/// Size of Open Graph and feed images.
pub const SOCIAL_WIDTH: u32 = 1200;
pub const SOCIAL_HEIGHT: u32 = 630;

/// Size of related-content card images.
pub const CARD_WIDTH: u32 = 800;
pub const CARD_HEIGHT: u32 = 600;

/// Returns the substring after `key=` up to the next `&`, if non-empty.
pub fn extract_image_key(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("key=")?;
    let key = rest.split('&').next().unwrap_or_default();
    (!key.is_empty()).then_some(key)
}

/// `<base>?key=<key>&width=<w>&height=<h>`
pub fn resized_image_url(base: &str, key: &str, width: u32, height: u32) -> String {
    format!("{}?key={}&width={}&height={}", base, key, width, height)
}

/// Proxy URL when the source carries a key, otherwise the source unchanged.
pub fn resized_or_raw(base: &str, source: &str, width: u32, height: u32) -> String {
    match extract_image_key(source) {
        Some(key) => resized_image_url(base, key, width, height),
        None => source.to_string(),
    }
}

/// True for URLs served by a video host we can embed.
pub fn is_video_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Embeddable player URL for a video link.
///
/// Watch links and short links are rewritten to the `/embed/<id>` form;
/// any other video-host URL is returned as is.
pub fn video_embed_url(url: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref VIDEO_ID: Regex = Regex::new(
            r"(?:youtube\.com/watch\?(?:[^#]*&)?v=|youtu\.be/|youtube\.com/embed/)([A-Za-z0-9_-]+)"
        ).expect("Failed to compile video id regex - this is a bug in the code");
    }

    if !is_video_url(url) {
        return None;
    }

    Some(match VIDEO_ID.captures(url).and_then(|c| c.get(1)) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id.as_str()),
        None => url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://gallery.example/api/image";

    #[test]
    fn key_is_cut_at_next_ampersand() {
        assert_eq!(
            extract_image_key("https://cdn.example/?key=foo.webp&width=10"),
            Some("foo.webp")
        );
        assert_eq!(extract_image_key("https://cdn.example/?key=bar.png"), Some("bar.png"));
    }

    #[test]
    fn missing_or_empty_key_is_none() {
        assert_eq!(extract_image_key("https://cdn.example/a.png"), None);
        assert_eq!(extract_image_key("https://cdn.example/?key=&width=3"), None);
    }

    #[test]
    fn resized_url_or_raw_fallback() {
        assert_eq!(
            resized_or_raw(BASE, "https://cdn.example/?key=foo.webp&width=10", 1200, 800),
            "https://gallery.example/api/image?key=foo.webp&width=1200&height=800"
        );
        assert_eq!(
            resized_or_raw(BASE, "https://cdn.example/plain.jpg", 1200, 800),
            "https://cdn.example/plain.jpg"
        );
    }

    #[test]
    fn watch_and_short_links_become_embed_links() {
        assert_eq!(
            video_embed_url("https://www.youtube.com/watch?v=abc123_-X&t=10s").as_deref(),
            Some("https://www.youtube.com/embed/abc123_-X")
        );
        assert_eq!(
            video_embed_url("https://youtu.be/xyz789").as_deref(),
            Some("https://www.youtube.com/embed/xyz789")
        );
        assert_eq!(
            video_embed_url("https://www.youtube.com/@kanal").as_deref(),
            Some("https://www.youtube.com/@kanal")
        );
        assert_eq!(video_embed_url("https://vimeo.com/1"), None);
    }
}

// src/site/feeds.rs
//! Sitemap, RSS and robots.txt.

use crate::config::SiteConfig;
use crate::media::{resized_image_url, SOCIAL_HEIGHT, SOCIAL_WIDTH};
use crate::model::Entry;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const RSS_DESCRIPTION: &str = "Türkiye&apos;nin en kapsamlı bebek isimleri sitesi. İsim anlamları, popüler isimler, ve bebek ismi seçme rehberi.";
const RSS_LOGO_SIZE: u32 = 144;

/// Escapes the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wraps text in a CDATA section, splitting any `]]>` it contains.
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

/// `Fri, 15 Mar 2024 00:00:00 GMT`
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Static pages followed by every post URL.
pub fn sitemap_xml(config: &SiteConfig, posts: &[Entry], now: DateTime<Utc>) -> String {
    let site = &config.site_url;
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<urlset xmlns=\"{}\">", SITEMAP_XMLNS);

    let static_pages = [site.join("/"), site.join("/blog")];
    let post_pages = posts
        .iter()
        .map(|post| (site.join(&post.post_path()), post.published_at().unwrap_or(now)));

    for (loc, modified) in static_pages.into_iter().map(|loc| (loc, now)).chain(post_pages) {
        let _ = writeln!(
            out,
            "<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n</url>",
            escape_xml(&loc),
            modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    out.push_str("</urlset>\n");
    out
}

/// RSS 2.0 channel with one item per name.
pub fn rss_xml(config: &SiteConfig, names: &[Entry], now: DateTime<Utc>) -> String {
    let site = config.site_url.as_str();
    let identity = &config.identity;
    let title = escape_xml(&identity.full_title());

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(concat!(
        "<rss version=\"2.0\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" ",
        "xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:atom=\"http://www.w3.org/2005/Atom\" ",
        "xmlns:sy=\"http://purl.org/rss/1.0/modules/syndication/\" ",
        "xmlns:media=\"http://search.yahoo.com/mrss/\">\n"
    ));
    out.push_str("<channel>\n");
    let _ = writeln!(out, "  <title>{}</title>", title);
    let _ = writeln!(
        out,
        "  <atom:link href=\"{}/rss\" rel=\"self\" type=\"application/rss+xml\" />",
        site
    );
    let _ = writeln!(out, "  <link>{}</link>", site);
    let _ = writeln!(out, "  <description>{}</description>", RSS_DESCRIPTION);
    let _ = writeln!(out, "  <lastBuildDate>{}</lastBuildDate>", http_date(now));
    let _ = writeln!(out, "  <language>{}</language>", identity.language);
    out.push_str("  <sy:updatePeriod>daily</sy:updatePeriod>\n");
    out.push_str("  <sy:updateFrequency>1</sy:updateFrequency>\n");
    let _ = writeln!(
        out,
        "  <image>\n    <url>{}</url>\n    <title>{}</title>\n    <link>{}</link>\n    <width>{}</width>\n    <height>{}</height>\n  </image>",
        escape_xml(&identity.logo_url(&config.site_url)),
        title,
        site,
        RSS_LOGO_SIZE,
        RSS_LOGO_SIZE
    );

    for name in names {
        write_rss_item(&mut out, config, name, now);
    }

    out.push_str("</channel>\n</rss>\n");
    out
}

fn write_rss_item(out: &mut String, config: &SiteConfig, name: &Entry, now: DateTime<Utc>) {
    let url = escape_xml(&config.site_url.join(&name.name_path()));
    let image = escape_xml(&resized_image_url(
        config.identity.image_proxy_base,
        name.cover_key(config.identity.default_image_key),
        SOCIAL_WIDTH,
        SOCIAL_HEIGHT,
    ));

    let _ = write!(
        out,
        concat!(
            "  <item>\n",
            "    <title>{title}</title>\n",
            "    <link>{url}</link>\n",
            "    <pubDate>{date}</pubDate>\n",
            "    <guid isPermaLink=\"true\">{url}</guid>\n",
            "    <description>{description}</description>\n",
            "    <media:content url=\"{image}\" medium=\"image\" width=\"{w}\" height=\"{h}\" />\n",
            "    <media:thumbnail url=\"{image}\" width=\"{w}\" height=\"{h}\" />\n",
            "  </item>\n"
        ),
        title = escape_xml(name.title_or_untitled()),
        url = url,
        date = http_date(name.published_at().unwrap_or(now)),
        description = cdata(name.description.as_deref().unwrap_or_default()),
        image = image,
        w = SOCIAL_WIDTH,
        h = SOCIAL_HEIGHT,
    );
}

pub fn robots_txt(config: &SiteConfig) -> String {
    let site = &config.site_url;
    format!(
        concat!(
            "User-Agent: *\n",
            "Allow: /\n",
            "Allow: /_next/static/media\n",
            "Allow: /_next/static/css\n",
            "Allow: /_next/static/chunks\n",
            "Disallow: /_next/\n",
            "Disallow: /404.html\n",
            "Disallow: /private/\n",
            "\n",
            "Sitemap: {}\n",
            "Sitemap: {}\n"
        ),
        site.join("/sitemap.xml"),
        site.join("/rss")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;
    use crate::types::{ApiKey, Color, DatabaseId, SiteUrl};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn config() -> SiteConfig {
        SiteConfig::new(
            ApiKey::new("secret_0123456789abcdef0123456789abcdef").unwrap(),
            DatabaseId::parse("0123456789abcdef0123456789abcdef").unwrap(),
            DatabaseId::parse("fedcba9876543210fedcba9876543210").unwrap(),
            SiteUrl::parse("https://minikadlar.com").unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn sitemap_lists_static_pages_then_posts() {
        let post = Entry {
            title: Some("Kız İsimleri".into()),
            tags: vec![Tag { name: "Öneriler".into(), color: Color::Default }],
            published: Some("2024-03-15".into()),
            ..Entry::default()
        };
        let xml = sitemap_xml(&config(), &[post], now());

        let locs: Vec<&str> = xml
            .lines()
            .filter_map(|l| l.strip_prefix("<loc>")?.strip_suffix("</loc>"))
            .collect();
        assert_eq!(
            locs,
            vec![
                "https://minikadlar.com",
                "https://minikadlar.com/blog",
                "https://minikadlar.com/blog/oneriler/kiz-isimleri",
            ]
        );
        assert!(xml.contains("<lastmod>2024-03-15T00:00:00Z</lastmod>"));
        assert!(xml.contains("<lastmod>2024-05-01T12:00:00Z</lastmod>"));
    }

    #[test]
    fn rss_items_are_escaped_and_sized() {
        let name = Entry {
            title: Some("Ali & Veli".into()),
            description: Some("Güzel <b>isim</b>".into()),
            published: Some("2024-03-15".into()),
            cover_url: Some("https://cdn.example/?key=ali.webp&x=1".into()),
            ..Entry::default()
        };
        let xml = rss_xml(&config(), &[name], now());

        assert!(xml.contains("<title>MinikAdlar - Bebek İsimleri ve Anlamları</title>"));
        assert!(xml.contains("<title>Ali &amp; Veli</title>"));
        assert!(xml.contains("<link>https://minikadlar.com/isim/ali-veli</link>"));
        assert!(xml.contains("<pubDate>Fri, 15 Mar 2024 00:00:00 GMT</pubDate>"));
        assert!(xml.contains("<description><![CDATA[Güzel <b>isim</b>]]></description>"));
        assert!(xml.contains(
            "<media:content url=\"https://minikadlar-gallery.vercel.app/api/image?key=ali.webp&amp;width=1200&amp;height=630\""
        ));
        assert!(xml.contains("<language>tr-TR</language>"));
    }

    #[test]
    fn cdata_cannot_be_closed_early() {
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn robots_points_at_both_feeds() {
        let robots = robots_txt(&config());
        assert!(robots.starts_with("User-Agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: /private/\n"));
        assert!(robots.contains("Sitemap: https://minikadlar.com/sitemap.xml\n"));
        assert!(robots.ends_with("Sitemap: https://minikadlar.com/rss\n"));
    }
}

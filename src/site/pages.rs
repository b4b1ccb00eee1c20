// src/site/pages.rs
//! Page assembly: content lookups, block rendering and templates.

use super::alphabet::{Gender, Letter};
use super::content::{self, LetterListing};
use super::feeds;
use super::metadata::{format_date_tr, seo_description, PageMetadata};
use super::related::related;
use super::structured_data::{
    article_graph, listing_graph, ArticleData, Breadcrumb, ListingItem, Publisher,
};
use super::templates::SiteTemplates;
use crate::api::{fetch_block_tree, find_name_by_slug, DatabaseQuery, NotionRepository};
use crate::config::SiteConfig;
use crate::constants::{NAME_FACTS_MIN_BLOCKS, RELATED_ITEM_COUNT};
use crate::error::AppError;
use crate::media::{
    resized_image_url, CARD_HEIGHT, CARD_WIDTH, IMAGE_HEIGHT, IMAGE_WIDTH, SOCIAL_HEIGHT,
    SOCIAL_WIDTH,
};
use crate::model::Entry;
use crate::rendering::{render_page, table_of_contents, RenderContext};
use crate::slug::slugify;
use crate::types::NotionId;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

const HOME_DESCRIPTION: &str = "Türkiye'nin en kapsamlı bebek isimleri sitesi. İsim anlamları, popüler isimler, ve bebek ismi seçme rehberi.";
const BLOG_TITLE: &str = "Blog | MinikAdlar";
const BLOG_DESCRIPTION: &str =
    "Bebek isimleri, çocuk gelişimi ve ebeveynlik hakkında en güncel bilgiler ve öneriler.";
const NAMES_TITLE: &str = "İsimler | MinikAdlar";
const NAMES_DESCRIPTION: &str =
    "Türkçe bebek isimleri, anlamları ve özellikleri. Bebeğiniz için en güzel ismi bulun.";
const LETTERS_TITLE: &str = "İsim Listeleri | MinikAdlar";
const LETTERS_DESCRIPTION: &str = "Harflere göre kategorize edilmiş bebek isimleri listeleri. Kız ve erkek bebek isimleri için kapsamlı rehber.";
const NOT_FOUND_TITLE: &str = "Sayfa Bulunamadı | MinikAdlar";
const UNAVAILABLE_TITLE: &str = "Hata | MinikAdlar";
const UNAVAILABLE_MESSAGE: &str =
    "İçerik yüklenirken bir hata oluştu. Lütfen daha sonra tekrar deneyin.";

const MISSING_DESCRIPTION: &str = "Açıklama bulunmuyor.";
const MISSING_MEANING: &str = "Bu ismin anlamı henüz eklenmemiştir.";
const MISSING_ORIGIN: &str = "Belirtilmemiş";
const UNKNOWN_ORIGIN: &str = "Bilinmiyor";
const DEFAULT_GENDER: &str = "Unisex";

/// Outcome of a page request.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Html(String),
    NotFound,
    /// Upstream content could not be loaded; `retry` is the page's path.
    Unavailable { retry: String },
}

/// A listing card.
#[derive(Debug, Serialize)]
struct Card {
    href: String,
    title: String,
    image: String,
    date: Option<String>,
    description: String,
    emoji: Option<String>,
    tags: Vec<String>,
}

/// Facts shown on a name page whose body is too short.
#[derive(Debug, Serialize, PartialEq)]
struct NameFacts {
    meaning: String,
    origin: String,
    gender: String,
}

impl NameFacts {
    fn of(name: &Entry) -> Self {
        let meaning = non_empty(&name.meaning)
            .or_else(|| non_empty(&name.description))
            .unwrap_or(MISSING_MEANING);
        Self {
            meaning: meaning.to_string(),
            origin: non_empty(&name.origin).unwrap_or(MISSING_ORIGIN).to_string(),
            gender: non_empty(&name.gender).unwrap_or(DEFAULT_GENDER).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelatedName {
    href: String,
    title: String,
    gender: String,
    gender_class: &'static str,
    origin: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn gender_class(gender: &str) -> &'static str {
    match gender {
        "Erkek" => "bg-blue-100 text-blue-800",
        "Kız" => "bg-pink-100 text-pink-800",
        _ => "bg-purple-100 text-purple-800",
    }
}

/// The site: content source, configuration and templates.
pub struct Site {
    repo: Arc<dyn NotionRepository>,
    config: SiteConfig,
    templates: SiteTemplates,
}

impl Site {
    pub fn new(repo: Arc<dyn NotionRepository>, config: SiteConfig) -> Result<Self, AppError> {
        Ok(Self {
            repo,
            config,
            templates: SiteTemplates::new()?,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn repo(&self) -> &dyn NotionRepository {
        self.repo.as_ref()
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(self.config.identity.image_proxy_base)
    }

    fn html<T: Serialize>(
        &self,
        template: &str,
        data: &T,
        meta: &PageMetadata,
    ) -> Result<Page, AppError> {
        self.templates
            .render_page(template, data, meta, &self.config)
            .map(Page::Html)
    }

    fn unavailable(&self, path: &str, err: &AppError) -> Page {
        log::error!("Could not load content for {}: {}", path, err);
        Page::Unavailable {
            retry: path.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.site_url.join(path)
    }

    fn image(&self, entry: &Entry, width: u32, height: u32) -> String {
        let identity = &self.config.identity;
        resized_image_url(
            identity.image_proxy_base,
            entry.cover_key(identity.default_image_key),
            width,
            height,
        )
    }

    fn crumb(&self, name: impl Into<String>, path: &str) -> Breadcrumb {
        Breadcrumb::new(name, self.url(path))
    }

    fn with_publisher<R>(&self, f: impl FnOnce(&Publisher) -> R) -> R {
        let logo = self.config.identity.logo_url(&self.config.site_url);
        f(&Publisher {
            name: self.config.identity.name,
            url: self.config.site_url.as_str(),
            logo: &logo,
        })
    }

    fn letters(&self) -> Vec<Value> {
        self.config
            .alphabet
            .letters()
            .iter()
            .map(|letter| json!({ "upper": letter.upper, "path": letter.path() }))
            .collect()
    }

    fn post_card(&self, post: &Entry) -> Card {
        Card {
            href: post.post_path(),
            title: post.title_or_untitled().to_string(),
            image: self.image(post, CARD_WIDTH, CARD_HEIGHT),
            date: post.published_date().map(format_date_tr),
            description: non_empty(&post.description)
                .or_else(|| non_empty(&post.summary))
                .unwrap_or(MISSING_DESCRIPTION)
                .to_string(),
            emoji: post.icon_emoji.clone(),
            tags: post.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }

    fn name_card(&self, name: &Entry) -> Card {
        Card {
            href: name.name_path(),
            description: name
                .description_or_meaning()
                .unwrap_or(MISSING_DESCRIPTION)
                .to_string(),
            ..self.post_card(name)
        }
    }

    fn listing_items<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a Entry>,
        path: fn(&Entry) -> String,
    ) -> Vec<ListingItem> {
        entries
            .into_iter()
            .map(|entry| ListingItem {
                title: entry.title_or_untitled().to_string(),
                description: entry.description.clone().unwrap_or_default(),
                url: self.url(&path(entry)),
                image_url: self.image(entry, IMAGE_WIDTH, IMAGE_HEIGHT),
                published: entry.published.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// `/`
    pub async fn home(&self) -> Result<Page, AppError> {
        let posts = content::listing(
            self.repo(),
            &self.config.posts_database,
            &DatabaseQuery::latest_posts(),
            "latest posts",
        )
        .await;

        let title = self.config.identity.full_title();
        let meta = PageMetadata::website(&title, HOME_DESCRIPTION, self.url("/"));
        let data = json!({
            "title": title,
            "description": HOME_DESCRIPTION,
            "letters": self.letters(),
            "posts": posts.iter().map(|p| self.post_card(p)).collect::<Vec<_>>(),
        });
        self.html("home", &data, &meta)
    }

    /// `/blog`
    pub async fn blog(&self) -> Result<Page, AppError> {
        let posts = content::listing(
            self.repo(),
            &self.config.posts_database,
            &DatabaseQuery::all_published_posts(),
            "blog posts",
        )
        .await;

        let url = self.url("/blog");
        let crumbs = vec![self.crumb("Ana Sayfa", "/"), self.crumb("Blog", "/blog")];
        let items = self.listing_items(&posts, Entry::post_path);
        let graph = self.with_publisher(|publisher| {
            listing_graph(BLOG_TITLE, BLOG_DESCRIPTION, &url, &items, &crumbs, publisher)
        });
        let meta = PageMetadata::website(BLOG_TITLE, BLOG_DESCRIPTION, &url).with_json_ld(&graph);

        let tags: Vec<Value> = content::distinct_tags(&posts)
            .into_iter()
            .map(|tag| json!({ "name": tag.name, "href": format!("/blog/{}", slugify(&tag.name)) }))
            .collect();
        let data = json!({
            "heading": "Blog",
            "tags": tags,
            "posts": posts.iter().map(|p| self.post_card(p)).collect::<Vec<_>>(),
        });
        self.html("blog", &data, &meta)
    }

    /// `/blog/<tag>`
    pub async fn blog_tag(&self, tag: &str) -> Result<Page, AppError> {
        let tag_slug = slugify(tag);
        let path = format!("/blog/{}", tag_slug);

        // A failed lookup shows an empty listing; only a successful lookup
        // with no matching post is a missing page.
        let posts = match self
            .repo()
            .query_database(&self.config.posts_database, &DatabaseQuery::all_published_posts())
            .await
        {
            Ok(posts) => {
                if content::posts_in_tag(&posts, &tag_slug).is_empty() {
                    return Ok(Page::NotFound);
                }
                posts
            }
            Err(err) => {
                log::warn!("Could not load posts for {}, showing an empty listing: {}", path, err);
                Vec::new()
            }
        };
        let tagged = content::posts_in_tag(&posts, &tag_slug);

        let display = tagged
            .first()
            .map(|post| post.primary_tag().to_string())
            .unwrap_or_else(|| content::tag_display_name(&tag_slug));
        let title = format!("{} | Blog | MinikAdlar", display);
        let description = format!(
            "{} kategorisindeki en güncel bebek isimleri ve ebeveynlik yazıları.",
            display
        );

        let url = self.url(&path);
        let crumbs = vec![
            self.crumb("Ana Sayfa", "/"),
            self.crumb("Blog", "/blog"),
            self.crumb(display.as_str(), &path),
        ];
        let items = self.listing_items(tagged.iter().copied(), Entry::post_path);
        let graph = self.with_publisher(|publisher| {
            listing_graph(&title, &description, &url, &items, &crumbs, publisher)
        });
        let meta = PageMetadata::website(&title, &description, &url).with_json_ld(&graph);

        let data = json!({
            "heading": format!("{} Kategorisindeki Yazılar", display),
            "breadcrumbs": crumbs,
            "posts": tagged.iter().map(|p| self.post_card(p)).collect::<Vec<_>>(),
        });
        self.html("blog", &data, &meta)
    }

    /// `/blog/<tag>/<slug>`
    pub async fn post(&self, tag: &str, slug: &str) -> Result<Page, AppError> {
        let path = format!("/blog/{}/{}", tag, slug);

        let (found, posts) =
            match content::find_post(self.repo(), &self.config.posts_database, tag, slug).await {
                Ok(found) => found,
                Err(err) => return Ok(self.unavailable(&path, &err)),
            };
        let Some(post) = found else {
            log::debug!("No post at {}", path);
            return Ok(Page::NotFound);
        };

        let blocks = match fetch_block_tree(self.repo(), &NotionId::from(&post.id)).await {
            Ok(blocks) => blocks,
            Err(err) => return Ok(self.unavailable(&path, &err)),
        };
        log::debug!("Rendering {} with {} top-level blocks", path, blocks.len());

        let identity = &self.config.identity;
        let title = post.title_or_untitled();
        let canonical = self.url(&post.post_path());
        let description = post.description.as_deref().unwrap_or_default();
        let published = post
            .published
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        let modified = post.last_edited.clone().unwrap_or_else(|| published.clone());
        let tag_path = format!("/blog/{}", post.tag_slug());

        let crumbs = vec![
            self.crumb("Ana Sayfa", "/"),
            self.crumb("Blog", "/blog"),
            self.crumb(content::tag_display_name(&post.tag_slug()), &tag_path),
            Breadcrumb::new(title, canonical.as_str()),
        ];
        let author_url = self.url(&format!("/yazar/{}", slugify(identity.author)));
        let cover = self.image(&post, IMAGE_WIDTH, IMAGE_HEIGHT);
        let graph = self.with_publisher(|publisher| {
            article_graph(
                &ArticleData {
                    title,
                    description,
                    published: &published,
                    modified: &modified,
                    author_name: identity.author,
                    author_url: &author_url,
                    image_url: &cover,
                    url: &canonical,
                    breadcrumbs: &crumbs,
                },
                publisher,
            )
        });
        let meta = PageMetadata::article(title, seo_description(description), &canonical, identity.author)
            .with_image(self.image(&post, SOCIAL_WIDTH, SOCIAL_HEIGHT))
            .with_times(Some(published.clone()), Some(modified))
            .with_json_ld(&graph);

        let toc: Vec<Value> = table_of_contents(&blocks)
            .iter()
            .map(|entry| {
                json!({ "anchor": entry.anchor, "text": entry.text, "indent": entry.indent_class() })
            })
            .collect();
        let related: Vec<Card> = related(&post.id, &posts, RELATED_ITEM_COUNT)
            .into_iter()
            .map(|p| self.post_card(p))
            .collect();

        let data = json!({
            "title": title,
            "image": cover,
            "breadcrumbs": crumbs,
            "toc": toc,
            "content": render_page(&blocks, &self.render_context()),
            "author": identity.author,
            "fact_checker": identity.fact_checker,
            "date": post.published_date().map(format_date_tr),
            "datetime": published,
            "related": related,
        });
        self.html("post", &data, &meta)
    }

    /// `/isim`
    pub async fn names(&self) -> Result<Page, AppError> {
        let names = content::listing(
            self.repo(),
            &self.config.names_database,
            &DatabaseQuery::all_names(),
            "names",
        )
        .await;

        let url = self.url("/isim");
        let crumbs = vec![self.crumb("Ana Sayfa", "/"), self.crumb("İsimler", "/isim")];
        let items = self.listing_items(&names, Entry::name_path);
        let graph = self.with_publisher(|publisher| {
            listing_graph(NAMES_TITLE, NAMES_DESCRIPTION, &url, &items, &crumbs, publisher)
        });
        let meta = PageMetadata::website(NAMES_TITLE, NAMES_DESCRIPTION, &url).with_json_ld(&graph);

        let data = json!({
            "names": names.iter().map(|n| self.name_card(n)).collect::<Vec<_>>(),
        });
        self.html("names", &data, &meta)
    }

    /// `/isim/<slug>`
    pub async fn name(&self, slug: &str) -> Result<Page, AppError> {
        let path = format!("/isim/{}", slug);

        let name = match find_name_by_slug(self.repo(), &self.config.names_database, slug).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                log::debug!("No name at {}", path);
                return Ok(Page::NotFound);
            }
            Err(err) => return Ok(self.unavailable(&path, &err)),
        };

        let blocks = match fetch_block_tree(self.repo(), &NotionId::from(&name.id)).await {
            Ok(blocks) => blocks,
            Err(err) => return Ok(self.unavailable(&path, &err)),
        };
        let all_names = content::listing(
            self.repo(),
            &self.config.names_database,
            &DatabaseQuery::all_names(),
            "names for related names",
        )
        .await;

        let identity = &self.config.identity;
        let title = name.title_or_untitled();
        let canonical = self.url(&path);
        let description = name.description.as_deref().unwrap_or_default();
        let published = name
            .published
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        let modified = name.last_edited.clone().unwrap_or_else(|| published.clone());

        let crumbs = vec![
            self.crumb("Ana Sayfa", "/"),
            self.crumb("İsimler", "/isim"),
            Breadcrumb::new(title, canonical.as_str()),
        ];
        let author_url = self.url(&format!("/yazar/{}", slugify(identity.author)));
        let cover = self.image(&name, IMAGE_WIDTH, IMAGE_HEIGHT);
        let graph = self.with_publisher(|publisher| {
            article_graph(
                &ArticleData {
                    title,
                    description,
                    published: &published,
                    modified: &modified,
                    author_name: identity.author,
                    author_url: &author_url,
                    image_url: &cover,
                    url: &canonical,
                    breadcrumbs: &crumbs,
                },
                publisher,
            )
        });
        let meta = PageMetadata::article(
            format!("{} - İsim Anlamı ve Özellikleri", title),
            seo_description(description),
            &canonical,
            identity.author,
        )
        .with_image(self.image(&name, SOCIAL_WIDTH, SOCIAL_HEIGHT))
        .with_times(Some(published.clone()), Some(modified))
        .with_json_ld(&graph);

        let facts = (blocks.len() < NAME_FACTS_MIN_BLOCKS).then(|| NameFacts::of(&name));
        let related: Vec<RelatedName> = related(&name.id, &all_names, RELATED_ITEM_COUNT)
            .into_iter()
            .map(|other| {
                let gender = non_empty(&other.gender).unwrap_or(DEFAULT_GENDER);
                RelatedName {
                    href: other.name_path(),
                    title: other.title_or_untitled().to_string(),
                    gender: gender.to_string(),
                    gender_class: gender_class(gender),
                    origin: non_empty(&other.origin).unwrap_or(UNKNOWN_ORIGIN).to_string(),
                }
            })
            .collect();

        let data = json!({
            "title": title,
            "image": cover,
            "breadcrumbs": crumbs,
            "facts": facts,
            "content": render_page(&blocks, &self.render_context()),
            "author": identity.author,
            "fact_checker": identity.fact_checker,
            "date": name.published_date().map(format_date_tr),
            "datetime": published,
            "related": related,
        });
        self.html("name", &data, &meta)
    }

    /// `/listeler`
    pub async fn letters_index(&self) -> Result<Page, AppError> {
        let meta = PageMetadata::website(LETTERS_TITLE, LETTERS_DESCRIPTION, self.url("/listeler"));
        let data = json!({ "letters": self.letters() });
        self.html("letters", &data, &meta)
    }

    /// `/listeler/<harf>`
    pub async fn letter(&self, raw: &str) -> Result<Page, AppError> {
        let letter = match self.config.alphabet.find(raw) {
            Ok(letter) => letter,
            Err(err) => {
                log::debug!("{}", err);
                return Ok(Page::NotFound);
            }
        };

        let listing = content::letter_listing(self.repo(), &self.config.names_database, letter).await;
        if listing.is_empty() {
            return Ok(Page::NotFound);
        }

        let meta = PageMetadata::website(
            format!("{} Harfi ile Başlayan İsimler | MinikAdlar", letter.upper),
            format!(
                "{} harfi ile başlayan kız ve erkek bebek isimleri listesi. İsimlerin anlamları ve özellikleri.",
                letter.upper
            ),
            self.url(&letter.path()),
        );
        let crumbs = vec![
            self.crumb("Ana Sayfa", "/"),
            self.crumb("İsim Listeleri", "/listeler"),
            self.crumb(format!("{} Harfi", letter.upper), &letter.path()),
        ];
        let data = json!({
            "upper": letter.upper,
            "breadcrumbs": crumbs,
            "sections": [
                letter_section(&listing, letter, Gender::Boy),
                letter_section(&listing, letter, Gender::Girl),
            ],
        });
        self.html("letter", &data, &meta)
    }

    /// `/sitemap.xml`
    pub async fn sitemap(&self) -> Result<String, AppError> {
        let posts = self
            .repo()
            .query_database(&self.config.posts_database, &DatabaseQuery::all_published_posts())
            .await?;
        Ok(feeds::sitemap_xml(&self.config, &posts, Utc::now()))
    }

    /// `/rss`
    pub async fn rss(&self) -> Result<String, AppError> {
        let names = self
            .repo()
            .query_database(&self.config.names_database, &DatabaseQuery::all_names())
            .await?;
        Ok(feeds::rss_xml(&self.config, &names, Utc::now()))
    }

    /// `/robots.txt`
    pub fn robots(&self) -> String {
        feeds::robots_txt(&self.config)
    }

    pub fn not_found_html(&self) -> Result<String, AppError> {
        let meta = PageMetadata::website(NOT_FOUND_TITLE, HOME_DESCRIPTION, self.url("/"));
        self.templates
            .render_page("not_found", &json!({}), &meta, &self.config)
    }

    pub fn unavailable_html(&self, retry: &str) -> Result<String, AppError> {
        let meta = PageMetadata::website(UNAVAILABLE_TITLE, UNAVAILABLE_MESSAGE, self.url(retry));
        let data = json!({ "message": UNAVAILABLE_MESSAGE, "retry": retry });
        self.templates
            .render_page("error", &data, &meta, &self.config)
    }
}

fn letter_section(listing: &LetterListing, letter: Letter, gender: Gender) -> Value {
    let names = listing.names(gender);
    json!({
        "id": slugify(gender.heading()),
        "heading": gender.heading(),
        "count": names.len(),
        "names": names
            .iter()
            .map(|name| json!({ "href": name.name_path(), "title": name.title_or_untitled() }))
            .collect::<Vec<_>>(),
        "empty_message": format!(
            "{} harfi ile başlayan {} ismi bulunamadı.",
            letter.upper,
            gender.tag_word()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_facts_fall_back_field_by_field() {
        let bare = Entry::default();
        assert_eq!(
            NameFacts::of(&bare),
            NameFacts {
                meaning: MISSING_MEANING.into(),
                origin: "Belirtilmemiş".into(),
                gender: "Unisex".into(),
            }
        );

        let described = Entry {
            description: Some("Işık".into()),
            origin: Some("Türkçe".into()),
            gender: Some("Kız".into()),
            ..Entry::default()
        };
        assert_eq!(NameFacts::of(&described).meaning, "Işık");

        let with_meaning = Entry {
            meaning: Some("Değerli taş".into()),
            ..described
        };
        let facts = NameFacts::of(&with_meaning);
        assert_eq!(facts.meaning, "Değerli taş");
        assert_eq!(facts.origin, "Türkçe");
        assert_eq!(facts.gender, "Kız");
    }

    #[test]
    fn gender_badges() {
        assert_eq!(gender_class("Erkek"), "bg-blue-100 text-blue-800");
        assert_eq!(gender_class("Kız"), "bg-pink-100 text-pink-800");
        assert_eq!(gender_class("Unisex"), "bg-purple-100 text-purple-800");
    }
}

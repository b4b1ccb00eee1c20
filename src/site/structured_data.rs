// src/site/structured_data.rs
//! schema.org JSON-LD graphs for articles and listings.

use crate::media::{IMAGE_HEIGHT, IMAGE_WIDTH};
use serde::Serialize;
use serde_json::{json, Value};

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub item: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: item.into(),
        }
    }
}

/// Who publishes the site.
#[derive(Debug, Clone, Copy)]
pub struct Publisher<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub logo: &'a str,
}

/// Inputs of an article page graph.
#[derive(Debug, Clone)]
pub struct ArticleData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub published: &'a str,
    pub modified: &'a str,
    pub author_name: &'a str,
    pub author_url: &'a str,
    pub image_url: &'a str,
    pub url: &'a str,
    pub breadcrumbs: &'a [Breadcrumb],
}

/// One entry of a listing graph.
#[derive(Debug, Clone)]
pub struct ListingItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published: String,
}

fn website(publisher: &Publisher) -> Value {
    json!({
        "@type": "WebSite",
        "@id": format!("{}/#website", publisher.url),
        "url": publisher.url,
        "name": publisher.name,
        "publisher": {
            "@type": "Organization",
            "name": publisher.name,
            "logo": { "@type": "ImageObject", "url": publisher.logo },
        },
    })
}

fn organization(publisher: &Publisher) -> Value {
    json!({
        "@type": "Organization",
        "name": publisher.name,
        "logo": { "@type": "ImageObject", "url": publisher.logo },
        "url": publisher.url,
    })
}

fn breadcrumb_list(breadcrumbs: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = breadcrumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": { "@id": crumb.item, "name": crumb.name },
            })
        })
        .collect();

    json!({ "@type": "BreadcrumbList", "itemListElement": items })
}

/// Graph of a post or name detail page.
pub fn article_graph(article: &ArticleData, publisher: &Publisher) -> Value {
    let website = website(publisher);
    let image = json!({
        "@type": "ImageObject",
        "url": article.image_url,
        "width": IMAGE_WIDTH,
        "height": IMAGE_HEIGHT,
    });
    let person = json!({
        "@type": "Person",
        "name": article.author_name,
        "url": article.author_url,
    });
    let organization = organization(publisher);
    let breadcrumbs = breadcrumb_list(article.breadcrumbs);

    let article_node = json!({
        "@type": "Article",
        "headline": article.title,
        "description": article.description,
        "image": image,
        "author": person,
        "publisher": organization,
        "datePublished": article.published,
        "dateModified": article.modified,
        "mainEntityOfPage": { "@type": "WebPage", "@id": article.url },
    });
    let web_page = json!({
        "@type": "WebPage",
        "@id": article.url,
        "url": article.url,
        "name": article.title,
        "description": article.description,
        "datePublished": article.published,
        "dateModified": article.modified,
        "author": person,
        "publisher": organization,
        "image": image,
        "breadcrumb": breadcrumbs,
        "isPartOf": website,
    });

    json!({
        "@context": "https://schema.org",
        "@graph": [website, image, person, organization, breadcrumbs, article_node, web_page],
    })
}

/// Graph of a listing page such as `/blog`.
pub fn listing_graph(
    title: &str,
    description: &str,
    url: &str,
    items: &[ListingItem],
    breadcrumbs: &[Breadcrumb],
    publisher: &Publisher,
) -> Value {
    let website = website(publisher);
    let organization = organization(publisher);
    let breadcrumbs = breadcrumb_list(breadcrumbs);

    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": {
                    "@type": "BlogPosting",
                    "headline": item.title,
                    "description": item.description,
                    "url": item.url,
                    "image": item.image_url,
                    "datePublished": item.published,
                    "publisher": organization,
                },
            })
        })
        .collect();
    let item_list = json!({ "@type": "ItemList", "itemListElement": elements });

    let web_page = json!({
        "@type": "WebPage",
        "@id": url,
        "url": url,
        "name": title,
        "description": description,
        "breadcrumb": breadcrumbs,
        "publisher": organization,
        "isPartOf": website,
    });

    json!({
        "@context": "https://schema.org",
        "@graph": [website, organization, breadcrumbs, item_list, web_page],
    })
}

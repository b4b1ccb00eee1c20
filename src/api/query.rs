// src/api/query.rs
//! Database query bodies for the two Notion databases.

use crate::constants::{LATEST_POSTS_PAGE_SIZE, NAMES_PAGE_SIZE};
use crate::site::alphabet::{Gender, Letter};
use serde_json::{json, Value};

/// A `databases/{id}/query` request.
///
/// `follow_cursor` asks the client to keep fetching while the API reports
/// more results; otherwise only the first page is read.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseQuery {
    filter: Option<Value>,
    sorts: Vec<Value>,
    page_size: Option<u32>,
    follow_cursor: bool,
}

fn published_not_empty() -> Value {
    json!({ "property": "Published", "date": { "is_not_empty": true } })
}

fn sort_by(property: &str, direction: &str) -> Value {
    json!({ "property": property, "direction": direction })
}

impl DatabaseQuery {
    /// Newest published posts, one page.
    pub fn latest_posts() -> Self {
        Self {
            filter: Some(published_not_empty()),
            sorts: vec![sort_by("Published", "descending")],
            page_size: Some(LATEST_POSTS_PAGE_SIZE),
            follow_cursor: false,
        }
    }

    /// Every published post, newest first, for the sitemap.
    pub fn all_published_posts() -> Self {
        Self {
            filter: Some(published_not_empty()),
            sorts: vec![sort_by("Published", "descending")],
            page_size: None,
            follow_cursor: true,
        }
    }

    /// Every titled name, alphabetical.
    pub fn all_names() -> Self {
        Self {
            filter: Some(json!({
                "and": [{ "property": "Name", "title": { "is_not_empty": true } }]
            })),
            sorts: vec![sort_by("Name", "ascending")],
            page_size: Some(NAMES_PAGE_SIZE),
            follow_cursor: true,
        }
    }

    /// Published names tagged `<letter> erkek` or `<letter> kız`.
    pub fn names_by_letter(letter: &Letter, gender: Gender) -> Self {
        Self {
            filter: Some(json!({
                "and": [
                    published_not_empty(),
                    { "property": "Tags", "multi_select": { "contains": letter.gender_tag(gender) } }
                ]
            })),
            sorts: vec![sort_by("Name", "ascending")],
            page_size: Some(NAMES_PAGE_SIZE),
            follow_cursor: false,
        }
    }

    /// The name whose `URL` property contains `slug`.
    pub fn name_by_url(slug: &str) -> Self {
        Self {
            filter: Some(json!({ "property": "URL", "rich_text": { "contains": slug } })),
            sorts: Vec::new(),
            page_size: Some(1),
            follow_cursor: false,
        }
    }

    pub fn follows_cursor(&self) -> bool {
        self.follow_cursor
    }

    /// Request body, continuing from `cursor` when given.
    pub fn body(&self, cursor: Option<&str>) -> Value {
        let mut body = json!({});
        if let Some(filter) = &self.filter {
            body["filter"] = filter.clone();
        }
        if !self.sorts.is_empty() {
            body["sorts"] = Value::Array(self.sorts.clone());
        }
        if let Some(page_size) = self.page_size {
            body["page_size"] = json!(page_size);
        }
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::alphabet::Alphabet;
    use pretty_assertions::assert_eq;

    #[test]
    fn latest_posts_body() {
        assert_eq!(
            DatabaseQuery::latest_posts().body(None),
            json!({
                "filter": { "property": "Published", "date": { "is_not_empty": true } },
                "sorts": [{ "property": "Published", "direction": "descending" }],
                "page_size": 12
            })
        );
    }

    #[test]
    fn sitemap_query_has_no_page_size_and_follows_cursor() {
        let query = DatabaseQuery::all_published_posts();
        assert!(query.follows_cursor());
        assert_eq!(query.body(Some("abc")).get("page_size"), None);
        assert_eq!(query.body(Some("abc"))["start_cursor"], json!("abc"));
    }

    #[test]
    fn letter_query_uses_gender_tag() {
        let letter = Alphabet::turkish().find("ç").unwrap();
        let body = DatabaseQuery::names_by_letter(&letter, Gender::Girl).body(None);
        assert_eq!(
            body["filter"]["and"][1],
            json!({ "property": "Tags", "multi_select": { "contains": "ç kız" } })
        );
        assert_eq!(body["sorts"][0]["property"], json!("Name"));
        assert_eq!(body["page_size"], json!(100));
    }

    #[test]
    fn url_lookup_asks_for_one_row() {
        let body = DatabaseQuery::name_by_url("zeynep").body(None);
        assert_eq!(body["page_size"], json!(1));
        assert_eq!(body["filter"]["rich_text"]["contains"], json!("zeynep"));
        assert_eq!(body.get("sorts"), None);
    }
}

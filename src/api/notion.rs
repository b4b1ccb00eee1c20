// src/api/notion.rs
//! [`NotionRepository`] over any [`NotionTransport`].

use super::client::NotionTransport;
use super::pagination::fetch_pages;
use super::parser;
use super::query::DatabaseQuery;
use super::NotionRepository;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Block, Entry};
use crate::types::{DatabaseId, NotionId, PageId};

/// Reads pages, database rows and block children through a transport,
/// live or cached.
pub struct NotionContentClient<T> {
    transport: T,
}

impl<T: NotionTransport> NotionContentClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl<T: NotionTransport> NotionRepository for NotionContentClient<T> {
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<Entry>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        let transport = &self.transport;
        let endpoint = endpoint.as_str();

        let entries = fetch_pages(
            |cursor| async move {
                let body = query.body(cursor.as_deref());
                let response = transport.post(endpoint, &body).await?;
                parser::parse_pages_pagination(response)
            },
            query.follows_cursor(),
        )
        .await?;

        log::debug!("Query on {} returned {} rows", database, entries.len());
        Ok(entries)
    }

    async fn retrieve_page(&self, id: &PageId) -> Result<Entry, AppError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let response = self.transport.get(&endpoint).await?;
        parser::parse_page_response(response)
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let base = format!(
            "blocks/{}/children?page_size={}",
            parent.to_hyphenated(),
            NOTION_API_PAGE_SIZE
        );
        let transport = &self.transport;
        let base = base.as_str();

        fetch_pages(
            |cursor| async move {
                let endpoint = match cursor {
                    Some(cursor) => format!("{}&start_cursor={}", base, cursor),
                    None => base.to_string(),
                };
                let response = transport.get(&endpoint).await?;
                parser::parse_blocks_pagination(response)
            },
            true,
        )
        .await
    }
}

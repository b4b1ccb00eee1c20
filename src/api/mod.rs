//! Notion API interaction: the ability to read the site's content.
//!
//! I/O ([`client`]), caching ([`cache`]), envelope parsing ([`parser`]) and
//! lenient record decoding ([`decode`]) are kept apart; page code depends
//! only on [`NotionRepository`].

pub mod cache;
pub mod client;
pub mod decode;
mod notion;
mod pagination;
pub mod parser;
pub mod query;

use crate::constants::BLOCK_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::{Block, Entry};
use crate::types::{ApiKey, DatabaseId, NotionId, PageId};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

pub use cache::CachedNotionClient;
pub use client::{NotionHttpClient, NotionTransport};
pub use notion::NotionContentClient;
pub use query::DatabaseQuery;

/// The ability to retrieve content from the Notion workspace.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Vec<Entry>, AppError>;
    async fn retrieve_page(&self, id: &PageId) -> Result<Entry, AppError>;
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;
}

/// Builds the live repository, behind the revalidation cache unless
/// `revalidate` is `None`.
pub fn connect(
    api_key: &ApiKey,
    revalidate: Option<Duration>,
) -> Result<Arc<dyn NotionRepository>, AppError> {
    let http = NotionHttpClient::new(api_key)?;
    Ok(match revalidate {
        Some(ttl) => {
            log::info!("Revalidating upstream responses every {}s", ttl.as_secs());
            Arc::new(NotionContentClient::new(CachedNotionClient::new(http, ttl)))
        }
        None => {
            log::info!("Response cache disabled");
            Arc::new(NotionContentClient::new(http))
        }
    })
}

/// Fetches a page's blocks with their children.
///
/// Children already embedded in a payload are kept; a block that reports
/// children but carries none has them fetched, down to
/// `BLOCK_MAX_FETCH_DEPTH` levels below the page.
pub async fn fetch_block_tree(
    repo: &dyn NotionRepository,
    page: &NotionId,
) -> Result<Vec<Block>, AppError> {
    let mut blocks = repo.retrieve_children(page).await?;
    expand_children(repo, &mut blocks, 1).await?;
    Ok(blocks)
}

fn expand_children<'a>(
    repo: &'a dyn NotionRepository,
    blocks: &'a mut [Block],
    depth: usize,
) -> BoxFuture<'a, Result<(), AppError>> {
    Box::pin(async move {
        for block in blocks.iter_mut() {
            if block.common().has_children && block.children().is_empty() {
                if depth >= BLOCK_MAX_FETCH_DEPTH {
                    log::debug!(
                        "Not expanding {} ({}): depth limit {} reached",
                        block.id(),
                        block.kind(),
                        BLOCK_MAX_FETCH_DEPTH
                    );
                    continue;
                }
                let children = repo.retrieve_children(&NotionId::from(block.id())).await?;
                block.set_children(children);
            }
            expand_children(repo, &mut block.common_mut().children, depth + 1).await?;
        }
        Ok(())
    })
}

/// Finds the name row shown at `/isim/<slug>`.
///
/// Tries the `URL` property query first, then scans every name for a
/// matching `URL` property or slugged title.
pub async fn find_name_by_slug(
    repo: &dyn NotionRepository,
    names: &DatabaseId,
    slug: &str,
) -> Result<Option<Entry>, AppError> {
    match repo
        .query_database(names, &DatabaseQuery::name_by_url(slug))
        .await
    {
        Ok(rows) => {
            if let Some(found) = rows.into_iter().next() {
                log::debug!("Found name {} by URL property", found.id);
                return Ok(Some(found));
            }
        }
        Err(err) => log::warn!("URL lookup for '{}' failed, scanning all names: {}", slug, err),
    }

    let all = repo
        .query_database(names, &DatabaseQuery::all_names())
        .await?;
    Ok(all.into_iter().find(|entry| entry.matches_name_slug(slug)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, ParagraphBlock, TextBlockContent, ToggleBlock};
    use crate::types::{BlockId, RichTextItem};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeRepository {
        children: HashMap<String, Vec<Block>>,
        url_rows: Vec<Entry>,
        all_rows: Vec<Entry>,
        child_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl NotionRepository for FakeRepository {
        async fn query_database(
            &self,
            _database: &DatabaseId,
            query: &DatabaseQuery,
        ) -> Result<Vec<Entry>, AppError> {
            if *query == DatabaseQuery::all_names() {
                Ok(self.all_rows.clone())
            } else {
                Ok(self.url_rows.clone())
            }
        }

        async fn retrieve_page(&self, id: &PageId) -> Result<Entry, AppError> {
            Err(AppError::NotFound(id.to_string()))
        }

        async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
            self.child_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .children
                .get(parent.as_str())
                .cloned()
                .unwrap_or_default())
        }
    }

    fn toggle(id: &str, has_children: bool) -> Block {
        let mut common = BlockCommon::new(BlockId::from_raw(id));
        common.has_children = has_children;
        Block::Toggle(ToggleBlock {
            common,
            content: TextBlockContent::new(vec![RichTextItem::plain_text(id)]),
        })
    }

    fn paragraph(id: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(BlockId::from_raw(id)),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(id)]),
        })
    }

    #[tokio::test]
    async fn expands_nested_children() {
        let page = NotionId::parse("https://www.notion.so/x-0123456789abcdef0123456789abcdef")
            .unwrap();
        let mut repo = FakeRepository::default();
        repo.children.insert(
            page.as_str().to_string(),
            vec![toggle("t1", true), paragraph("p0")],
        );
        repo.children.insert("t1".into(), vec![toggle("t2", true)]);
        repo.children.insert("t2".into(), vec![paragraph("p1")]);

        let blocks = fetch_block_tree(&repo, &page).await.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].children().len(), 1);
        assert_eq!(blocks[0].children()[0].children()[0].kind(), "paragraph");
        assert_eq!(repo.child_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn embedded_children_are_not_refetched() {
        let mut repo = FakeRepository::default();
        let mut embedded = toggle("t1", true);
        embedded.set_children(vec![paragraph("p1")]);
        let page = NotionId::parse("0123456789abcdef0123456789abcdef").unwrap();
        repo.children.insert(page.as_str().to_string(), vec![embedded]);

        let blocks = fetch_block_tree(&repo, &page).await.unwrap();
        assert_eq!(blocks[0].children().len(), 1);
        assert_eq!(repo.child_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expansion_stops_at_depth_limit() {
        let mut repo = FakeRepository::default();
        let page = NotionId::parse("0123456789abcdef0123456789abcdef").unwrap();
        repo.children.insert(page.as_str().to_string(), vec![toggle("d1", true)]);
        for level in 1..20 {
            repo.children.insert(
                format!("d{}", level),
                vec![toggle(&format!("d{}", level + 1), true)],
            );
        }

        fetch_block_tree(&repo, &page).await.unwrap();
        assert_eq!(repo.child_calls.load(Ordering::SeqCst), BLOCK_MAX_FETCH_DEPTH);
    }

    #[tokio::test]
    async fn name_lookup_falls_back_to_title_scan() {
        let names = DatabaseId::parse("0123456789abcdef0123456789abcdef").unwrap();
        let mut repo = FakeRepository::default();
        repo.all_rows = vec![
            Entry {
                title: Some("Ayşe".into()),
                ..Entry::default()
            },
            Entry {
                title: Some("Çağan".into()),
                ..Entry::default()
            },
        ];

        let found = find_name_by_slug(&repo, &names, "cagan").await.unwrap();
        assert_eq!(found.and_then(|e| e.title), Some("Çağan".to_string()));
        assert!(find_name_by_slug(&repo, &names, "yok").await.unwrap().is_none());

        repo.url_rows = vec![Entry {
            title: Some("Elif".into()),
            ..Entry::default()
        }];
        let found = find_name_by_slug(&repo, &names, "anything").await.unwrap();
        assert_eq!(found.and_then(|e| e.title), Some("Elif".to_string()));
    }
}

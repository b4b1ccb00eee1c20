// src/api/pagination.rs
//! Cursor pagination over list endpoints.

use super::parser::PaginatedResponse;
use crate::constants::MAX_PAGINATION_PAGES;
use crate::error::AppError;

/// Calls `fetch_fn` with the running cursor until the API reports no more
/// results, `follow` is false, or the page cap is reached.
pub async fn fetch_pages<T, F, Fut>(mut fetch_fn: F, follow: bool) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;
        pages_fetched += 1;

        all_items.extend(response.results);
        cursor = response.next_cursor;

        if !follow || !response.has_more || cursor.is_none() {
            break;
        }
        if pages_fetched >= MAX_PAGINATION_PAGES {
            log::warn!("Stopped after {} result pages", pages_fetched);
            break;
        }
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(items: Vec<u32>, next: Option<&str>) -> PaginatedResponse<u32> {
        PaginatedResponse {
            results: items,
            has_more: next.is_some(),
            next_cursor: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn follows_cursors_in_order() {
        let mut seen = Vec::new();
        let items = fetch_pages(
            |cursor| {
                seen.push(cursor.clone());
                let response = match cursor.as_deref() {
                    None => page(vec![1, 2], Some("c1")),
                    Some("c1") => page(vec![3], Some("c2")),
                    _ => page(vec![4], None),
                };
                async move { Ok(response) }
            },
            true,
        )
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(seen, vec![None, Some("c1".to_string()), Some("c2".to_string())]);
    }

    #[tokio::test]
    async fn single_page_when_not_following() {
        let items = fetch_pages(
            |_| async { Ok(page(vec![1], Some("more"))) },
            false,
        )
        .await
        .unwrap();
        assert_eq!(items, vec![1]);
    }
}

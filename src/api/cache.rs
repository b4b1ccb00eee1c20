// src/api/cache.rs
//! In-memory revalidation cache for Notion API calls.
//!
//! Caches raw response bodies keyed by request, with a freshness window.
//! On a hit, the cached text is re-parsed through the same parsers used
//! for live responses; the domain model is never stored.

use super::client::{ApiResponse, NotionTransport};
use crate::constants::CACHE_CAPACITY;
use crate::error::AppError;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

struct CacheEntry {
    data: String,
    fetched_at: Instant,
}

/// Bounded LRU of raw response bodies with a freshness window.
///
/// The lock is only held for the map operation itself, never across an
/// upstream request.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Returns the body if it is still inside the window. Stale entries are
    /// dropped.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let fresh = entries.get(key)?.fetched_at.elapsed() < self.ttl;
        if fresh {
            entries.get(key).map(|entry| entry.data.clone())
        } else {
            entries.pop(key);
            None
        }
    }

    pub fn set(&self, key: &str, data: &str) {
        self.entries.lock().put(
            key.to_string(),
            CacheEntry {
                data: data.to_string(),
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`NotionTransport`] that answers from the cache while a response is
/// fresh and asks the wrapped transport otherwise. Only successful
/// responses are stored.
pub struct CachedNotionClient<T> {
    inner: T,
    cache: ResponseCache,
}

impl<T: NotionTransport> CachedNotionClient<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self::with_capacity(inner, ttl, CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: T, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(capacity, ttl),
        }
    }

    fn hit(&self, cache_key: &str) -> Option<ApiResponse<String>> {
        let data = self.cache.get(cache_key)?;
        log::debug!("Cache hit: {}", cache_key);
        Some(ApiResponse {
            data,
            status: reqwest::StatusCode::OK,
            url: format!("cache://{}", cache_key),
        })
    }

    fn remember(&self, cache_key: &str, response: &ApiResponse<String>) {
        if response.status.is_success() {
            self.cache.set(cache_key, &response.data);
        }
    }
}

#[async_trait::async_trait]
impl<T: NotionTransport> NotionTransport for CachedNotionClient<T> {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse<String>, AppError> {
        let cache_key = format!("GET {}", endpoint);
        if let Some(response) = self.hit(&cache_key) {
            return Ok(response);
        }

        log::debug!("Cache miss: {}", cache_key);
        let response = self.inner.get(endpoint).await?;
        self.remember(&cache_key, &response);
        Ok(response)
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse<String>, AppError> {
        let cache_key = format!("POST {} {}", endpoint, body);
        if let Some(response) = self.hit(&cache_key) {
            return Ok(response);
        }

        log::debug!("Cache miss: {}", cache_key);
        let response = self.inner.post(endpoint, body).await?;
        self.remember(&cache_key, &response);
        Ok(response)
    }
}

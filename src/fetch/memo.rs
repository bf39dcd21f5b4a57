//! Memoized Fetch
//!
//! Wraps a [`Fetcher`] with per-URL access counting and a time-bounded
//! content cache in the shared store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::fetch::{cache_key, count_key, Fetcher};
use crate::store::KeyValueStore;

/// Default time-to-live for memoized page content.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

// == Memoized Fetch ==
/// Caches fetched content per URL with a TTL fixed at construction.
///
/// Every access attempt bumps the URL's counter, hit or miss. The miss
/// path is check-then-fetch-then-set: concurrent callers for the same
/// cold URL may each perform the underlying fetch.
pub struct MemoizedFetch<F> {
    kv: Arc<dyn KeyValueStore>,
    fetcher: F,
    ttl: Duration,
}

impl<F: Fetcher> MemoizedFetch<F> {
    // == Constructors ==
    /// Wraps `fetcher` with the default TTL.
    pub fn new(kv: Arc<dyn KeyValueStore>, fetcher: F) -> Self {
        Self::with_ttl(kv, fetcher, DEFAULT_PAGE_TTL)
    }

    /// Wraps `fetcher`, caching content for `ttl`.
    pub fn with_ttl(kv: Arc<dyn KeyValueStore>, fetcher: F, ttl: Duration) -> Self {
        Self { kv, fetcher, ttl }
    }

    // == Fetch ==
    /// Returns the content of `url`, from cache when fresh.
    ///
    /// A failed underlying fetch propagates to the caller and never
    /// populates the cache; the access counter has already been bumped
    /// by then.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.kv.incr(&count_key(url)).await?;

        if let Some(bytes) = self.kv.get(&cache_key(url)).await? {
            if let Ok(content) = String::from_utf8(bytes) {
                debug!(url, "serving cached content");
                return Ok(content);
            }
        }

        info!(url, "fetching from origin");
        let content = self.fetcher.get(url).await?;
        self.kv
            .set_ex(&cache_key(url), content.as_bytes(), self.ttl)
            .await?;

        Ok(content)
    }

    // == Access Count ==
    /// Returns how many times `url` has been requested through this
    /// layer. A missing counter reads as zero.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        let count = self
            .kv
            .get(&count_key(url))
            .await?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|text| text.parse().ok())
            .unwrap_or(0);
        Ok(count)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a canned page and counts how often it is actually hit.
    #[derive(Clone)]
    struct StubFetcher {
        hits: Arc<AtomicUsize>,
        fail: bool,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                hits: Arc::new(AtomicUsize::new(0)),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                hits: Arc::new(AtomicUsize::new(0)),
                fail: true,
            }
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn get(&self, url: &str) -> Result<String> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Store("origin unreachable".to_string()));
            }
            Ok(format!("<html>{url}</html>"))
        }
    }

    const URL: &str = "http://example.test/page";

    #[tokio::test]
    async fn test_first_fetch_hits_origin_once() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stub = StubFetcher::new();
        let memo = MemoizedFetch::new(kv, stub.clone());

        let content = memo.fetch(URL).await.unwrap();

        assert_eq!(content, format!("<html>{URL}</html>"));
        assert_eq!(stub.hits(), 1);
        assert_eq!(memo.access_count(URL).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_second_fetch_within_ttl_is_cached() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stub = StubFetcher::new();
        let memo = MemoizedFetch::new(kv, stub.clone());

        let first = memo.fetch(URL).await.unwrap();
        let second = memo.fetch(URL).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(stub.hits(), 1);
        assert_eq!(memo.access_count(URL).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_after_expiry_hits_origin_again() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stub = StubFetcher::new();
        let memo = MemoizedFetch::with_ttl(kv, stub.clone(), Duration::from_millis(30));

        memo.fetch(URL).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        memo.fetch(URL).await.unwrap();

        assert_eq!(stub.hits(), 2);
        assert_eq!(memo.access_count(URL).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_propagates_and_caches_nothing() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stub = StubFetcher::failing();
        let memo = MemoizedFetch::new(kv.clone(), stub.clone());

        assert!(memo.fetch(URL).await.is_err());

        // Counter bumped, cache untouched
        assert_eq!(memo.access_count(URL).await.unwrap(), 1);
        assert_eq!(kv.get(&cache_key(URL)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_access_counts_are_per_url() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stub = StubFetcher::new();
        let memo = MemoizedFetch::new(kv, stub.clone());

        memo.fetch("http://a.test/").await.unwrap();
        memo.fetch("http://a.test/").await.unwrap();
        memo.fetch("http://b.test/").await.unwrap();

        assert_eq!(memo.access_count("http://a.test/").await.unwrap(), 2);
        assert_eq!(memo.access_count("http://b.test/").await.unwrap(), 1);
        assert_eq!(memo.access_count("http://c.test/").await.unwrap(), 0);
    }
}

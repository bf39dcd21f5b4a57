//! Fetch Module
//!
//! Memoizes an expensive external fetch behind a time-bounded cache while
//! tracking access frequency per resource.

mod http;
mod memo;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use http::HttpFetcher;
pub use memo::{MemoizedFetch, DEFAULT_PAGE_TTL};

// == Fetcher ==
/// The underlying fetch against the real external resource.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the textual content of `url`.
    ///
    /// Implementations must treat a non-success response as an error and
    /// bound the round-trip with a timeout.
    async fn get(&self, url: &str) -> Result<String>;
}

// == Key Derivation ==
/// Counter key tracking access attempts for `url`.
pub(crate) fn count_key(url: &str) -> String {
    format!("count:{url}")
}

/// Cache key holding the memoized content for `url`.
pub(crate) fn cache_key(url: &str) -> String {
    format!("cache:{url}")
}

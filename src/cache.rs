//! Cache Module
//!
//! Stores scalar payloads under generated keys and retrieves them with
//! optional typed conversion. The cache keeps no local copy of anything:
//! every value lives in the injected key-value store.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::store::KeyValueStore;

// == Payload ==
/// A scalar value accepted by [`Cache::store`].
///
/// Payloads are flattened to a canonical byte encoding on write: UTF-8
/// for text, raw bytes for blobs, decimal rendering for numbers. Reads
/// return those bytes; the typed accessors decode them back.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
}

impl Payload {
    /// Returns the canonical byte encoding written to the store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.into_bytes(),
            Payload::Bytes(bytes) => bytes,
            Payload::Int(n) => n.to_string().into_bytes(),
            Payload::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Payload::Int(n)
    }
}

impl From<f64> for Payload {
    fn from(f: f64) -> Self {
        Payload::Float(f)
    }
}

// == Cache ==
/// Generated-key payload cache over the shared store.
pub struct Cache {
    /// Injected store handle
    kv: Arc<dyn KeyValueStore>,
}

impl Cache {
    // == Constructor ==
    /// Creates a new Cache over the given store handle.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    // == Store ==
    /// Writes a payload under a freshly generated key and returns the key.
    ///
    /// Keys are random 128-bit identifiers rendered as text, so a key is
    /// never reused across calls.
    pub async fn store(&self, payload: impl Into<Payload>) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.kv.set(&key, &payload.into().into_bytes()).await?;
        Ok(key)
    }

    // == Get ==
    /// Retrieves the raw bytes stored under `key`.
    ///
    /// A missing key is `None`, never an error.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.kv.get(key).await
    }

    /// Retrieves the bytes stored under `key` and applies a conversion
    /// strategy to them.
    ///
    /// A missing key or a failed conversion is `None`, never an error.
    pub async fn get_with<T>(&self, key: &str, convert: fn(&[u8]) -> Option<T>) -> Result<Option<T>> {
        let bytes = self.kv.get(key).await?;
        Ok(bytes.as_deref().and_then(convert))
    }

    /// Retrieves the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |bytes| String::from_utf8(bytes.to_vec()).ok())
            .await
    }

    /// Retrieves the value under `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |bytes| {
            std::str::from_utf8(bytes).ok()?.parse().ok()
        })
        .await
    }

    // == Flush ==
    /// Clears the entire store.
    ///
    /// Global: counters, call histories and memoized pages held by other
    /// consumers of the same store go with it. Intended for test
    /// isolation and initialization.
    pub async fn flush(&self) -> Result<()> {
        debug!("flushing entire store");
        self.kv.flush_all().await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_cache() -> Cache {
        Cache::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_store_roundtrip_text() {
        let cache = test_cache();

        let key = cache.store("bar").await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("bar".to_string()));
    }

    #[tokio::test]
    async fn test_store_roundtrip_bytes() {
        let cache = test_cache();

        let key = cache.store(&b"foo"[..]).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"foo".to_vec()));
    }

    #[tokio::test]
    async fn test_store_roundtrip_int() {
        let cache = test_cache();

        let key = cache.store(123i64).await.unwrap();
        assert_eq!(cache.get_int(&key).await.unwrap(), Some(123));
    }

    #[tokio::test]
    async fn test_store_roundtrip_float() {
        let cache = test_cache();

        let key = cache.store(1.5f64).await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), Some("1.5".to_string()));
    }

    #[tokio::test]
    async fn test_store_generates_fresh_keys() {
        let cache = test_cache();

        let first = cache.store("same").await.unwrap();
        let second = cache.store("same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let cache = test_cache();

        assert_eq!(cache.get("never-stored").await.unwrap(), None);
        assert_eq!(cache.get_str("never-stored").await.unwrap(), None);
        assert_eq!(cache.get_int("never-stored").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_int_parse_failure_is_none() {
        let cache = test_cache();

        let key = cache.store("not a number").await.unwrap();
        assert_eq!(cache.get_int(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_str_invalid_utf8_is_none() {
        let cache = test_cache();

        let key = cache.store(vec![0xff, 0xfe, 0xfd]).await.unwrap();
        assert_eq!(cache.get_str(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_with_custom_converter() {
        let cache = test_cache();

        let key = cache.store("7").await.unwrap();
        let doubled = cache
            .get_with(&key, |bytes| {
                let n: i64 = std::str::from_utf8(bytes).ok()?.parse().ok()?;
                Some(n * 2)
            })
            .await
            .unwrap();

        assert_eq!(doubled, Some(14));
    }

    #[tokio::test]
    async fn test_flush_clears_stored_values() {
        let cache = test_cache();

        let key = cache.store("bar").await.unwrap();
        cache.flush().await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[test]
    fn test_payload_canonical_encoding() {
        assert_eq!(Payload::from("text").into_bytes(), b"text".to_vec());
        assert_eq!(Payload::from(42i64).into_bytes(), b"42".to_vec());
        assert_eq!(Payload::from(2.25f64).into_bytes(), b"2.25".to_vec());
        assert_eq!(
            Payload::from(vec![1u8, 2, 3]).into_bytes(),
            vec![1u8, 2, 3]
        );
    }
}

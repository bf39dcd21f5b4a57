//! Memory Store Module
//!
//! In-process backend for the key-value store protocol: hash-map storage
//! with TTL entries, lazy expiry on read, and ordered list storage for
//! call histories.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::store::{KeyValueStore, StoreEntry};

// == Memory Store ==
/// Default in-process implementation of [`KeyValueStore`].
///
/// Scalar values and lists live in separate maps behind one RwLock; each
/// protocol operation takes the lock exactly once, which is what makes
/// increments and appends atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, StoreEntry>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired value entries.
    ///
    /// Returns the number of entries removed. Expiry is otherwise lazy
    /// (expired entries fall out on read); this exists for the
    /// background sweep task.
    pub async fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().await;

        let expired_keys: Vec<String> = inner
            .values
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            inner.values.remove(&key);
        }

        count
    }

    // == Length ==
    /// Returns the current number of live value entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.values.len()
    }

    /// Returns true if the store holds no values and no lists.
    pub async fn is_empty(&self) -> bool {
        let inner = self.inner.read().await;
        inner.values.is_empty() && inner.lists.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .values
            .insert(key.to_string(), StoreEntry::new(value.to_vec(), None));
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .values
            .insert(key.to_string(), StoreEntry::new(value.to_vec(), Some(ttl)));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: expired entries are removed on read
        let mut inner = self.inner.write().await;

        let expired = matches!(inner.values.get(key), Some(entry) if entry.is_expired());
        if expired {
            inner.values.remove(key);
            return Ok(None);
        }

        Ok(inner.values.get(key).map(|entry| entry.value.clone()))
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.inner.write().await;

        // An expired counter restarts from zero, like a missing one
        let live = match inner.values.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry),
            _ => None,
        };

        let (current, expires_at) = match live {
            Some(entry) => {
                let text = std::str::from_utf8(&entry.value)
                    .map_err(|_| Error::WrongType(key.to_string()))?;
                let current: i64 = text
                    .parse()
                    .map_err(|_| Error::WrongType(key.to_string()))?;
                (current, entry.expires_at)
            }
            None => (0, None),
        };

        let next = current + 1;
        let mut entry = StoreEntry::new(next.to_string().into_bytes(), None);
        entry.expires_at = expires_at;
        inner.values.insert(key.to_string(), entry);

        Ok(next)
    }

    async fn rpush(&self, key: &str, item: &[u8]) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push(item.to_vec());
        Ok(list.len())
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let inner = self.inner.read().await;
        let items = match inner.lists.get(key) {
            Some(list) => range_slice(list, start, stop).to_vec(),
            None => Vec::new(),
        };
        Ok(items)
    }

    async fn flush_all(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.values.clear();
        inner.lists.clear();
        Ok(())
    }
}

// == Range Resolution ==
/// Resolves an inclusive `[start, stop]` range over `list`.
///
/// Negative indices count from the tail; indices past either end are
/// clamped; an inverted range is empty.
fn range_slice(list: &[Vec<u8>], start: i64, stop: i64) -> &[Vec<u8>] {
    let len = list.len() as i64;
    if len == 0 {
        return &[];
    }

    let start = if start < 0 { len + start } else { start }.max(0);
    let stop = if stop < 0 { len + stop } else { stop }.min(len - 1);

    if start > stop {
        return &[];
    }

    &list[start as usize..=stop as usize]
}

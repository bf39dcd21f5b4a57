//! Store Module
//!
//! Defines the key-value store protocol consumed by the caching layer and
//! provides the in-process backend implementing it.

mod entry;
mod memory;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::StoreEntry;
pub use memory::MemoryStore;

// == Key-Value Store Protocol ==
/// Abstract surface of the backing key-value store.
///
/// One handle is constructed at startup and shared by injection
/// (`Arc<dyn KeyValueStore>`) across every component that needs it.
/// Implementations must make each individual operation atomic; nothing
/// above this trait layers additional locking. Implementations backed by
/// a remote store should bound their round-trips with a timeout and
/// surface failures as [`Error::Store`](crate::Error::Store) rather than
/// hang.
///
/// Missing keys are never an error: reads return `None` or an empty
/// range.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores raw bytes under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores raw bytes under `key` with a time-to-live.
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Retrieves the bytes stored under `key`, or `None` if the key is
    /// missing or its entry has expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the integer stored under `key` and returns
    /// the new value. A missing key counts up from zero.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends an item to the tail of the list stored under `key`,
    /// returning the new list length.
    async fn rpush(&self, key: &str, item: &[u8]) -> Result<usize>;

    /// Returns the inclusive range `[start, stop]` of the list stored
    /// under `key`. Negative indices count from the tail; out-of-range
    /// indices are clamped. A missing list yields an empty range.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key in the store. Global: counters, histories and
    /// cached content all go with it.
    async fn flush_all(&self) -> Result<()>;
}

//! Recall - An instrumented caching layer over a key-value store
//!
//! Stores scalar payloads under generated keys, counts and records the
//! call history of instrumented operations, replays that history, and
//! memoizes expensive HTTP fetches behind a time-bounded cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod instrument;
pub mod store;
pub mod tasks;

pub use cache::{Cache, Payload};
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, MemoizedFetch};
pub use instrument::{from_fn, Counted, Operation, Recorded, ReplayReporter};
pub use store::{KeyValueStore, MemoryStore};
pub use tasks::spawn_sweep_task;

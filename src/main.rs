//! Recall demo binary
//!
//! Wires a memory store, a payload cache, an instrumented operation and
//! a memoized fetcher together, then prints the recorded replay. Pass a
//! URL as the first argument to exercise the memoized fetch against it.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recall::{
    from_fn, spawn_sweep_task, Cache, Config, Counted, HttpFetcher, KeyValueStore, MemoizedFetch,
    MemoryStore, Operation, Payload, Recorded, ReplayReporter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: page_ttl={}s, http_timeout={}s, sweep_interval={}s",
        config.page_ttl, config.http_timeout, config.sweep_interval
    );

    // One store handle, shared by injection
    let store = Arc::new(MemoryStore::new());
    let kv: Arc<dyn KeyValueStore> = store.clone();

    let sweep_handle = spawn_sweep_task(store, config.sweep_interval);

    // Round-trip a few payloads through the generated-key cache
    let cache = Arc::new(Cache::new(kv.clone()));
    let key = cache.store("bar").await?;
    let value = cache.get_str(&key).await?;
    info!(%key, ?value, "stored and retrieved");

    // Instrument the store operation with counting and history recording
    let op = {
        let cache = cache.clone();
        from_fn(move |payload: Payload| {
            let cache = cache.clone();
            async move { cache.store(payload).await }
        })
    };
    let op = Counted::new(
        "cache.store",
        kv.clone(),
        Recorded::new("cache.store", kv.clone(), op),
    );

    op.call(Payload::from("foo")).await?;
    op.call(Payload::from(123i64)).await?;
    op.call(Payload::from(2.5f64)).await?;

    let reporter = ReplayReporter::new(kv.clone());
    println!("{}", reporter.replay("cache.store").await?);

    // Optionally memoize a page fetch
    if let Some(url) = std::env::args().nth(1) {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.http_timeout))?;
        let memo =
            MemoizedFetch::with_ttl(kv.clone(), fetcher, Duration::from_secs(config.page_ttl));

        let first = memo.fetch(&url).await?;
        let second = memo.fetch(&url).await?;
        let accesses = memo.access_count(&url).await?;
        info!(
            %url,
            bytes = first.len(),
            served_from_cache = first == second,
            accesses,
            "fetched page twice"
        );
    }

    sweep_handle.abort();
    Ok(())
}

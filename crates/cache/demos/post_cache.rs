//! Post cache walkthrough
//!
//! Caches three posts in a capacity-three LRU cache, reads the oldest one,
//! adds a fourth (evicting the least recently used post) and removes one,
//! printing the cache after every step.
//!
//! ```bash
//! RUST_LOG=recency_cache=trace cargo run -p recency-cache --example post_cache --features test-utils
//! ```

use std::fmt;

use recency_cache::cache::utils::CacheHealthReport;
use recency_cache::cache::{Cache, CacheConfig};
use recency_cache::collections::LruCache;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Post {
    id: u64,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostEntity{{id={}}}", self.id)
    }
}

const CONFIG: &str = r#"
name = "posts"
capacity = 3
track_metrics = true
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Single-owner cache: the rendering shows recency order, oldest first
    let mut posts = LruCache::try_new(3)?;
    posts.put("one", Post { id: 1 });
    posts.put("two", Post { id: 2 });
    posts.put("three", Post { id: 3 });
    println!("after three puts:  {posts}");

    posts.get(&"one");
    println!("after get(one):    {posts}");

    posts.put("four", Post { id: 4 });
    println!("after put(four):   {posts}");

    posts.remove(&"one");
    println!("after remove(one): {posts}");

    // Shared cache configured from TOML, with an eviction listener
    let config = CacheConfig::from_toml_str(CONFIG)?;
    let shared = Cache::with_eviction_listener(config, |key: &&str, post: &Post| {
        info!(key = *key, post = %post, "post evicted");
    })?;

    for (key, id) in [("one", 1), ("two", 2), ("three", 3)] {
        shared.put(key, Post { id });
    }
    shared.get("one");
    shared.put("four", Post { id: 4 });

    let order: Vec<String> =
        shared.entries_in_recency_order().map(|(key, post)| format!("{key}={post}")).collect();
    println!("shared cache:      {{{}}}", order.join(", "));

    let report = CacheHealthReport::new(&shared);
    report.log();
    println!("{report}");

    Ok(())
}

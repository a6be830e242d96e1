//! Read-through cache capability for trending snapshots
//!
//! The engine only ever talks to [`TrendingCache`]; Redis and in-process
//! implementations are interchangeable. Every method is fallible so that a
//! broken backend can be reported, but callers are expected to log and fall
//! through to direct computation.

use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::engine::TrendingSnapshot;

/// Cache key for a `(window, k)` trending query
#[must_use]
pub fn snapshot_key(window_minutes: i64, k: usize) -> String {
    format!("trending:{window_minutes}:{k}")
}

/// Glob matching every key produced by [`snapshot_key`]
pub const SNAPSHOT_KEY_PATTERN: &str = "trending:*";

#[async_trait]
pub trait TrendingCache: Send + Sync {
    /// Fetch a live snapshot, `None` on miss or expiry
    async fn get(&self, key: &str) -> crate::Result<Option<TrendingSnapshot>>;

    async fn set_with_ttl(
        &self,
        key: &str,
        snapshot: &TrendingSnapshot,
        ttl: Duration,
    ) -> crate::Result<()>;

    async fn delete(&self, key: &str) -> crate::Result<()>;

    /// Remove every trending snapshot, including ones this process never
    /// wrote. Returns how many were removed.
    async fn clear(&self) -> crate::Result<usize>;
}

/// In-process TTL map, used when caching is on but no Redis is configured
#[derive(Default)]
pub struct MemoryTrendingCache {
    entries: RwLock<HashMap<String, (Instant, TrendingSnapshot)>>,
}

impl MemoryTrendingCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl TrendingCache for MemoryTrendingCache {
    async fn get(&self, key: &str) -> crate::Result<Option<TrendingSnapshot>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((expires_at, snapshot)) if Instant::now() < *expires_at => {
                    return Ok(Some(snapshot.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it so the map does not grow with dead keys
        self.entries.write().await.remove(key);
        debug!("Trending cache entry {} expired", key);
        Ok(None)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        snapshot: &TrendingSnapshot,
        ttl: Duration,
    ) -> crate::Result<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (expires_at, snapshot.clone()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> crate::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> crate::Result<usize> {
        let mut entries = self.entries.write().await;
        let cleared = entries.len();
        entries.clear();
        Ok(cleared)
    }
}

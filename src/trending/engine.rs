//! Trending engine: default-window facade over the counter store with an
//! optional read-through snapshot cache.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use super::cache::snapshot_key;
use super::cache::TrendingCache;
use super::clock::Clock;
use super::counter::CounterStore;
use super::counter::HashtagTally;
use super::counter::StoreStatus;
use crate::config::TrendingConfig;

/// Widest window, in minutes, accepted from API and CLI callers
pub const MAX_WINDOW_MINUTES: i64 = 1440;

/// Check that `minutes` lies in `1..=MAX_WINDOW_MINUTES`
///
/// # Errors
/// Returns `InvalidInput` naming `name` when it does not
pub fn check_window_minutes(name: &str, minutes: i64) -> crate::Result<i64> {
    if (1..=MAX_WINDOW_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(crate::TagPulseError::InvalidInput(format!(
            "{name} must be between 1 and {MAX_WINDOW_MINUTES}, got {minutes}"
        )))
    }
}

/// Ordered top-K result for one `(window, k)` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSnapshot {
    pub window_minutes: i64,
    pub k: usize,
    pub hashtags: Vec<HashtagTally>,
}

/// How a cached query was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    /// The cache failed and the result was computed directly
    Error,
    /// No cache is configured
    Bypassed,
}

#[derive(Debug, Clone)]
pub struct CachedTop {
    pub snapshot: TrendingSnapshot,
    pub outcome: CacheOutcome,
}

pub struct TrendingEngine {
    store: Arc<CounterStore>,
    default_window_minutes: i64,
    cache: Option<Arc<dyn TrendingCache>>,
    cache_ttl: Duration,
    issued_keys: Mutex<HashSet<String>>,
    /// Bumped by every invalidation; a snapshot computed under an older
    /// generation must not stay in the cache
    generation: AtomicU64,
    /// Set once snapshots left behind by earlier processes have been dropped
    stale_cleared: AtomicBool,
}

impl TrendingEngine {
    #[must_use]
    pub fn new(store: Arc<CounterStore>, default_window_minutes: i64) -> Self {
        Self {
            store,
            default_window_minutes,
            cache: None,
            cache_ttl: Duration::from_secs(60),
            issued_keys: Mutex::new(HashSet::new()),
            generation: AtomicU64::new(0),
            stale_cleared: AtomicBool::new(false),
        }
    }

    /// Build an engine and its store from `[trending]` settings
    #[must_use]
    pub fn from_config(config: &TrendingConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(CounterStore::new(clock, config.retention_minutes));
        Self::new(store, config.default_window_minutes)
    }

    /// Attach a read-through cache for [`Self::top_cached`]
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn TrendingCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub const fn default_window_minutes(&self) -> i64 {
        self.default_window_minutes
    }

    #[must_use]
    pub fn store(&self) -> &Arc<CounterStore> {
        &self.store
    }

    #[must_use]
    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub fn increment(&self, hashtag: &str, amount: i64) {
        self.store.increment(hashtag, amount);
    }

    #[must_use]
    pub fn get_count(&self, hashtag: &str, window_minutes: Option<i64>) -> i64 {
        self.store
            .windowed_count(hashtag, window_minutes.unwrap_or(self.default_window_minutes))
    }

    #[must_use]
    pub fn top(&self, k: usize, window_minutes: Option<i64>) -> Vec<HashtagTally> {
        self.store
            .top_k(k, window_minutes.unwrap_or(self.default_window_minutes))
    }

    /// Compute a snapshot directly from the counters
    #[must_use]
    pub fn snapshot(&self, k: usize, window_minutes: Option<i64>) -> TrendingSnapshot {
        let window_minutes = window_minutes.unwrap_or(self.default_window_minutes);
        TrendingSnapshot {
            window_minutes,
            k,
            hashtags: self.store.top_k(k, window_minutes),
        }
    }

    /// Top-K through the cache when one is attached.
    ///
    /// Cache failures are logged and never change the result.
    pub async fn top_cached(&self, k: usize, window_minutes: Option<i64>) -> CachedTop {
        let window_minutes = window_minutes.unwrap_or(self.default_window_minutes);
        let Some(cache) = &self.cache else {
            return CachedTop {
                snapshot: self.snapshot(k, Some(window_minutes)),
                outcome: CacheOutcome::Bypassed,
            };
        };

        let key = snapshot_key(window_minutes, k);
        let mut outcome = CacheOutcome::Miss;
        match cache.get(&key).await {
            Ok(Some(snapshot)) => {
                debug!("Trending cache hit for {}", key);
                return CachedTop {
                    snapshot,
                    outcome: CacheOutcome::Hit,
                };
            }
            Ok(None) => debug!("Trending cache miss for {}", key),
            Err(e) => {
                warn!("Trending cache read failed for {}: {}", key, e);
                outcome = CacheOutcome::Error;
            }
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let snapshot = self.snapshot(k, Some(window_minutes));
        match cache.set_with_ttl(&key, &snapshot, self.cache_ttl).await {
            Ok(()) => {
                let still_current = {
                    let mut issued = self
                        .issued_keys
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    let current = self.generation.load(Ordering::SeqCst) == generation;
                    if current {
                        issued.insert(key.clone());
                    }
                    current
                };
                if !still_current {
                    debug!("Counters changed while caching {}, dropping it", key);
                    if let Err(e) = cache.delete(&key).await {
                        warn!("Failed to drop outdated trending snapshot {}: {}", key, e);
                        outcome = CacheOutcome::Error;
                    }
                }
            }
            Err(e) => {
                warn!("Trending cache write failed for {}: {}", key, e);
                outcome = CacheOutcome::Error;
            }
        }

        CachedTop { snapshot, outcome }
    }

    /// Delete every snapshot written since the last invalidation.
    ///
    /// The first call also clears every trending snapshot in the cache, so
    /// entries written before a restart do not outlive the startup sync.
    /// Returns the number of tracked keys deleted successfully.
    pub async fn invalidate_cache(&self) -> usize {
        let Some(cache) = &self.cache else {
            return 0;
        };
        self.generation.fetch_add(1, Ordering::SeqCst);

        if !self.stale_cleared.swap(true, Ordering::SeqCst) {
            match cache.clear().await {
                Ok(cleared) => debug!("Cleared {} trending snapshots on first sync", cleared),
                Err(e) => {
                    warn!("Failed to clear trending snapshots: {}", e);
                    self.stale_cleared.store(false, Ordering::SeqCst);
                }
            }
        }

        let keys: Vec<String> = self
            .issued_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();

        let mut deleted = 0;
        for key in keys {
            match cache.delete(&key).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!("Failed to invalidate trending cache key {}: {}", key, e),
            }
        }
        debug!("Invalidated {} trending cache entries", deleted);
        deleted
    }

    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.store.status()
    }
}

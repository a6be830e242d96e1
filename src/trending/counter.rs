//! Per-minute bucketed hashtag counters
//!
//! Every hashtag maps to an ordered set of minute buckets (`floor(unix_secs / 60)`).
//! Windowed sums only touch the buckets inside the window, and memory stays
//! bounded by `keys x retention_minutes` because stale buckets are evicted
//! lazily on every read and write.
//!
//! All state sits behind one store-wide mutex. Each public operation takes it
//! once, so the eviction pass and the mutation that follows it are atomic with
//! respect to concurrent callers.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::clock::Clock;

/// A hashtag with its summed count over a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagTally {
    pub hashtag: String,
    pub count: i64,
}

impl HashtagTally {
    #[must_use]
    pub fn new(hashtag: impl Into<String>, count: i64) -> Self {
        Self {
            hashtag: hashtag.into(),
            count,
        }
    }
}

/// Store-level health metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub total_keys: usize,
    pub total_buckets: usize,
    pub current_minute: i64,
    pub retention_window_minutes: i64,
}

struct Buckets {
    counters: HashMap<String, BTreeMap<i64, i64>>,
    /// Minute of the last eviction pass; passes run at most once per minute
    last_eviction: i64,
}

impl Buckets {
    fn evict_before(&mut self, cutoff: i64) -> usize {
        let mut dropped = 0;
        self.counters.retain(|_, buckets| {
            let kept = buckets.split_off(&cutoff);
            dropped += buckets.len();
            *buckets = kept;
            !buckets.is_empty()
        });
        dropped
    }
}

/// Time-bucketed counter store
pub struct CounterStore {
    clock: Arc<dyn Clock>,
    retention_minutes: i64,
    inner: Mutex<Buckets>,
}

impl CounterStore {
    /// Create a store that keeps `retention_minutes` of history
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, retention_minutes: i64) -> Self {
        let now = clock.current_minute();
        Self {
            clock,
            retention_minutes: retention_minutes.max(0),
            inner: Mutex::new(Buckets {
                counters: HashMap::new(),
                last_eviction: now,
            }),
        }
    }

    #[must_use]
    pub const fn retention_minutes(&self) -> i64 {
        self.retention_minutes
    }

    /// Current minute according to the store's clock
    #[must_use]
    pub fn current_minute(&self) -> i64 {
        self.clock.current_minute()
    }

    fn lock(&self) -> MutexGuard<'_, Buckets> {
        // Buckets are never left half-updated, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_locked(&self, buckets: &mut Buckets, current_minute: i64) {
        if current_minute <= buckets.last_eviction {
            return;
        }
        let cutoff = current_minute.saturating_sub(self.retention_minutes);
        let dropped = buckets.evict_before(cutoff);
        buckets.last_eviction = current_minute;
        if dropped > 0 {
            debug!(
                "Evicted {} stale buckets before minute {} ({} hashtags remain)",
                dropped,
                cutoff,
                buckets.counters.len()
            );
        }
    }

    /// Add `amount` to the current minute's bucket for `key`.
    ///
    /// Negative amounts act as decrements; counts are never clamped.
    pub fn increment(&self, key: &str, amount: i64) {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
        *buckets
            .counters
            .entry(key.to_string())
            .or_default()
            .entry(current_minute)
            .or_insert(0) += amount;
    }

    /// Overwrite the bucket for `key` at `minute`.
    ///
    /// Buckets older than the retention horizon are ignored; returns whether
    /// the bucket was written.
    pub fn set_bucket(&self, key: &str, minute: i64, count: i64) -> bool {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
        if minute < current_minute - self.retention_minutes {
            return false;
        }
        buckets
            .counters
            .entry(key.to_string())
            .or_default()
            .insert(minute, count);
        true
    }

    /// Sum of the buckets for `key` with minute >= current minute - `window_minutes`.
    ///
    /// A window of zero or less is always empty.
    #[must_use]
    pub fn windowed_count(&self, key: &str, window_minutes: i64) -> i64 {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
        if window_minutes <= 0 {
            return 0;
        }
        let cutoff = current_minute.saturating_sub(window_minutes);
        buckets
            .counters
            .get(key)
            .map_or(0, |series| series.range(cutoff..).map(|(_, count)| count).sum())
    }

    /// Hashtags with a positive windowed count, by count descending then name ascending,
    /// truncated to `k` entries.
    #[must_use]
    pub fn top_k(&self, k: usize, window_minutes: i64) -> Vec<HashtagTally> {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
        if window_minutes <= 0 || k == 0 {
            return Vec::new();
        }
        let cutoff = current_minute.saturating_sub(window_minutes);

        let mut tallies: Vec<HashtagTally> = buckets
            .counters
            .iter()
            .filter_map(|(hashtag, series)| {
                let total: i64 = series.range(cutoff..).map(|(_, count)| count).sum();
                (total > 0).then(|| HashtagTally::new(hashtag.clone(), total))
            })
            .collect();
        drop(buckets);

        tallies.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.hashtag.cmp(&b.hashtag))
        });
        tallies.truncate(k);
        tallies
    }

    /// Run the (throttled) eviction pass without reading or writing
    pub fn evict_stale(&self) {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
    }

    #[must_use]
    pub fn status(&self) -> StoreStatus {
        let current_minute = self.clock.current_minute();
        let mut buckets = self.lock();
        self.evict_locked(&mut buckets, current_minute);
        StoreStatus {
            total_keys: buckets.counters.len(),
            total_buckets: buckets.counters.values().map(BTreeMap::len).sum(),
            current_minute,
            retention_window_minutes: self.retention_minutes,
        }
    }
}

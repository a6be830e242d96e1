//! Bridge from persisted post/hashtag rows into the trending counters

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::engine::TrendingEngine;
use crate::models::HashtagCount;
use crate::models::PostHashtagRow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Rows read from the database
    pub rows: usize,
    pub buckets_written: usize,
    /// Buckets older than the retention horizon
    pub buckets_skipped: usize,
}

pub struct TrendingSync {
    engine: Arc<TrendingEngine>,
}

impl TrendingSync {
    #[must_use]
    pub const fn new(engine: Arc<TrendingEngine>) -> Self {
        Self { engine }
    }

    /// Rebuild minute buckets from `(post_created_at, hashtag)` rows.
    ///
    /// Each `(minute, hashtag)` bucket is overwritten with the number of rows
    /// that fall into it, then cached snapshots are invalidated.
    pub async fn populate_from_rows(&self, rows: &[PostHashtagRow]) -> SyncReport {
        let mut grouped: BTreeMap<(i64, &str), i64> = BTreeMap::new();
        for row in rows {
            let minute = row.post_created_at.timestamp().div_euclid(60);
            *grouped
                .entry((minute, row.hashtag_name.as_str()))
                .or_insert(0) += 1;
        }

        let store = self.engine.store();
        let mut report = SyncReport {
            rows: rows.len(),
            ..SyncReport::default()
        };
        for ((minute, hashtag), count) in grouped {
            if store.set_bucket(hashtag, minute, count) {
                report.buckets_written += 1;
            } else {
                report.buckets_skipped += 1;
            }
        }

        let invalidated = self.engine.invalidate_cache().await;
        info!(
            "Synced {} rows into {} buckets ({} skipped as stale, {} cache entries invalidated)",
            report.rows, report.buckets_written, report.buckets_skipped, invalidated
        );
        report
    }

    /// Add recent per-hashtag counts to the current minute's buckets
    pub fn apply_counts(&self, counts: &[HashtagCount]) -> usize {
        for row in counts {
            self.engine.increment(&row.hashtag_name, row.count);
        }
        debug!("Applied real-time counts for {} hashtags", counts.len());
        counts.len()
    }
}

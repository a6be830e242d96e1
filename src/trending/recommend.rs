//! Co-occurrence hashtag recommendations
//!
//! For a target hashtag present on `T` posts, every other hashtag that shares
//! `C` of those posts gets `rate = C / T`. Hashtags below the configured rate
//! are dropped and the rest keep the collaborator's ordering (co-occurrence
//! count descending).

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::models::CooccurrenceCount;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub hashtag: String,
    pub cooccurrence_rate: f64,
}

/// Collaborator that knows how hashtags are spread over posts
#[async_trait]
pub trait CooccurrenceSource: Send + Sync {
    /// Posts carrying `hashtag`, `None` if the hashtag does not exist
    async fn hashtag_total_post_count(&self, hashtag: &str) -> Result<Option<i64>>;

    /// For every other hashtag, the number of posts it shares with `hashtag`,
    /// ordered by that count descending
    async fn cooccurring_hashtag_counts(&self, hashtag: &str) -> Result<Vec<CooccurrenceCount>>;
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    min_cooccurrence_rate: f64,
}

impl RecommendationEngine {
    #[must_use]
    pub const fn new(min_cooccurrence_rate: f64) -> Self {
        Self {
            min_cooccurrence_rate,
        }
    }

    #[must_use]
    pub const fn min_cooccurrence_rate(&self) -> f64 {
        self.min_cooccurrence_rate
    }

    /// Turn raw co-occurrence counts into filtered, truncated recommendations
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Post counts stay far below 2^52
    pub fn rank(
        &self,
        target: &str,
        target_total: i64,
        counts: &[CooccurrenceCount],
        max_results: usize,
    ) -> Vec<Recommendation> {
        if target_total <= 0 {
            return Vec::new();
        }

        counts
            .iter()
            .filter(|row| row.hashtag_name != target)
            .map(|row| Recommendation {
                hashtag: row.hashtag_name.clone(),
                cooccurrence_rate: row.count as f64 / target_total as f64,
            })
            .filter(|rec| rec.cooccurrence_rate >= self.min_cooccurrence_rate)
            .take(max_results)
            .collect()
    }

    /// Fetch counts for `target` and rank them.
    ///
    /// An unknown hashtag, or one on zero posts, yields an empty list.
    ///
    /// # Errors
    /// Propagates collaborator failures
    pub async fn recommend(
        &self,
        source: &dyn CooccurrenceSource,
        target: &str,
        max_results: usize,
    ) -> Result<Vec<Recommendation>> {
        let Some(total) = source.hashtag_total_post_count(target).await? else {
            debug!("No recommendations: hashtag #{} does not exist", target);
            return Ok(Vec::new());
        };
        if total == 0 {
            return Ok(Vec::new());
        }

        let counts = source.cooccurring_hashtag_counts(target).await?;
        let recommendations = self.rank(target, total, &counts, max_results);
        debug!(
            "#{} on {} posts: {} co-occurring hashtags, {} recommended",
            target,
            total,
            counts.len(),
            recommendations.len()
        );
        Ok(recommendations)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(0.3)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn row(name: &str, count: i64) -> CooccurrenceCount {
        CooccurrenceCount {
            hashtag_name: name.to_string(),
            count,
        }
    }

    struct FixedSource {
        totals: HashMap<String, i64>,
        pairs: Vec<CooccurrenceCount>,
    }

    #[async_trait]
    impl CooccurrenceSource for FixedSource {
        async fn hashtag_total_post_count(&self, hashtag: &str) -> Result<Option<i64>> {
            Ok(self.totals.get(hashtag).copied())
        }

        async fn cooccurring_hashtag_counts(&self, _hashtag: &str) -> Result<Vec<CooccurrenceCount>> {
            Ok(self.pairs.clone())
        }
    }

    #[test]
    fn test_rate_is_exact_ratio() {
        let engine = RecommendationEngine::new(0.0);
        let recs = engine.rank("python", 7, &[row("fastapi", 3)], 3);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].cooccurrence_rate - 3.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rank_filters_and_truncates_in_input_order() {
        let engine = RecommendationEngine::default();
        let counts = [
            row("django", 8),
            row("fastapi", 5),
            row("flask", 3),
            row("rust", 2),
            row("numpy", 4),
        ];

        let recs = engine.rank("python", 10, &counts, 3);
        let names: Vec<&str> = recs.iter().map(|r| r.hashtag.as_str()).collect();
        assert_eq!(names, vec!["django", "fastapi", "flask"]);

        let recs = engine.rank("python", 10, &counts, 10);
        assert!(recs.iter().all(|r| r.cooccurrence_rate >= 0.3));
        assert_eq!(recs.len(), 4);
    }

    #[test]
    fn test_zero_total_is_empty() {
        let engine = RecommendationEngine::default();
        assert!(engine.rank("python", 0, &[row("fastapi", 1)], 3).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_hashtag_yields_empty() {
        let source = FixedSource {
            totals: HashMap::new(),
            pairs: vec![row("fastapi", 2)],
        };
        let recs = RecommendationEngine::default()
            .recommend(&source, "missing", 3)
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_uses_source_counts() {
        let source = FixedSource {
            totals: HashMap::from([("python".to_string(), 4)]),
            pairs: vec![row("fastapi", 2), row("ai", 1)],
        };
        let recs = RecommendationEngine::default()
            .recommend(&source, "python", 3)
            .await
            .unwrap();
        assert_eq!(
            recs,
            vec![Recommendation {
                hashtag: "fastapi".to_string(),
                cooccurrence_rate: 0.5,
            }]
        );
    }
}

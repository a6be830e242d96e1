//! Prometheus metrics for `tagpulse` monitoring
//!
//! This module exports metrics for:
//! - Counter store shape and real-time increments
//! - Trending cache outcomes
//! - Comment analyses
//! - API request counts and latency
//!
//! Collectors live in their own [`Registry`] owned by the application state.

use prometheus::Encoder;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;
use prometheus::TextEncoder;

use crate::trending::CacheOutcome;
use crate::trending::StoreStatus;

/// Metrics registry and collectors
pub struct Metrics {
    pub registry: Registry,

    // Trending metrics
    pub sync_rows: IntCounter,
    pub tracked_hashtags: IntGauge,
    pub tracked_buckets: IntGauge,
    pub trending_cache_requests: IntCounterVec,

    // Comment metrics
    pub comment_analyses: IntCounterVec,

    // API metrics
    pub api_requests_total: IntCounterVec,
    pub api_request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance
    ///
    /// # Errors
    /// Returns an error if a collector cannot be created or registered
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let sync_rows = IntCounter::with_opts(Opts::new(
            "tagpulse_sync_rows_total",
            "Post/hashtag rows loaded by trending syncs",
        ))?;

        let tracked_hashtags = IntGauge::with_opts(Opts::new(
            "tagpulse_tracked_hashtags",
            "Hashtags currently held in the counter store",
        ))?;

        let tracked_buckets = IntGauge::with_opts(Opts::new(
            "tagpulse_tracked_buckets",
            "Minute buckets currently held in the counter store",
        ))?;

        let trending_cache_requests = IntCounterVec::new(
            Opts::new(
                "tagpulse_trending_cache_requests_total",
                "Trending queries by cache outcome",
            ),
            &["outcome"],
        )?;

        let comment_analyses = IntCounterVec::new(
            Opts::new(
                "tagpulse_comment_analyses_total",
                "Comment analyses performed by kind",
            ),
            &["kind"],
        )?;

        let api_requests_total = IntCounterVec::new(
            Opts::new("tagpulse_api_requests_total", "Total API requests"),
            &["method", "status"],
        )?;

        let api_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "tagpulse_api_request_duration_seconds",
                "API request duration",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["method"],
        )?;

        registry.register(Box::new(sync_rows.clone()))?;
        registry.register(Box::new(tracked_hashtags.clone()))?;
        registry.register(Box::new(tracked_buckets.clone()))?;
        registry.register(Box::new(trending_cache_requests.clone()))?;
        registry.register(Box::new(comment_analyses.clone()))?;
        registry.register(Box::new(api_requests_total.clone()))?;
        registry.register(Box::new(api_request_duration.clone()))?;

        Ok(Self {
            registry,
            sync_rows,
            tracked_hashtags,
            tracked_buckets,
            trending_cache_requests,
            comment_analyses,
            api_requests_total,
            api_request_duration,
        })
    }

    /// Export metrics in Prometheus text format
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }

    pub fn record_cache_outcome(&self, outcome: CacheOutcome) {
        let label = match outcome {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Error => "error",
            CacheOutcome::Bypassed => "bypassed",
        };
        self.trending_cache_requests.with_label_values(&[label]).inc();
    }

    pub fn record_comment_analysis(&self, kind: &str) {
        self.comment_analyses.with_label_values(&[kind]).inc();
    }

    pub fn observe_request(&self, method: &str, status: u16, seconds: f64) {
        self.api_requests_total
            .with_label_values(&[method, &status.to_string()])
            .inc();
        self.api_request_duration
            .with_label_values(&[method])
            .observe(seconds);
    }

    #[allow(clippy::cast_possible_wrap)] // Store sizes fit comfortably in i64
    pub fn update_store_gauges(&self, status: &StoreStatus) {
        self.tracked_hashtags.set(status.total_keys as i64);
        self.tracked_buckets.set(status.total_buckets as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_recorded_values() {
        let metrics = Metrics::new().unwrap();
        metrics.record_cache_outcome(CacheOutcome::Hit);
        metrics.record_comment_analysis("depth");
        metrics.observe_request("GET", 200, 0.002);
        metrics.update_store_gauges(&StoreStatus {
            total_keys: 4,
            total_buckets: 9,
            current_minute: 0,
            retention_window_minutes: 1440,
        });

        let text = metrics.export().unwrap();
        assert!(text.contains("tagpulse_trending_cache_requests_total{outcome=\"hit\"} 1"));
        assert!(text.contains("tagpulse_comment_analyses_total{kind=\"depth\"} 1"));
        assert!(text.contains("tagpulse_tracked_buckets 9"));
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.sync_rows.inc_by(5);
        assert_eq!(b.sync_rows.get(), 0);
    }
}

//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::comments::CommentTreeNode;
use crate::comments::DepthReport;
use crate::comments::ViralChainReport;
use crate::comments::ViralCriteria;
use crate::database::EngagedUser;
use crate::database::GrowingHashtag;
use crate::database::HashtagReach;
use crate::database::TableRowCounts;
use crate::trending::HashtagTally;
use crate::trending::Recommendation;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Status of one dependency in the health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// "ok", "down" or "disabled"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
        }
    }

    #[must_use]
    pub fn down(error: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            status: "disabled".to_string(),
            error: None,
        }
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.status == "down"
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok", "degraded" (cache down) or "down" (database down)
    pub status: String,
    pub db: ComponentHealth,
    pub redis: ComponentHealth,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    #[must_use]
    pub fn overall_status(db: &ComponentHealth, redis: &ComponentHealth) -> &'static str {
        if db.is_down() {
            "down"
        } else if redis.is_down() {
            "degraded"
        } else {
            "ok"
        }
    }
}

/// `GET /api/health/db`: connectivity plus row counts of the main tables
#[derive(Debug, Serialize, Deserialize)]
pub struct DbHealthResponse {
    #[serde(flatten)]
    pub health: ComponentHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<TableRowCounts>,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of each step of the Redis SET/GET/DEL round-trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisOperations {
    pub set: bool,
    /// The value read back equals the one written
    pub get: bool,
    pub delete: bool,
}

/// `GET /api/health/redis`
#[derive(Debug, Serialize, Deserialize)]
pub struct RedisHealthResponse {
    #[serde(flatten)]
    pub health: ComponentHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<RedisOperations>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    pub window: Option<i64>,
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub hashtags: Vec<HashtagTally>,
    pub window_minutes: i64,
    pub total_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub max_recommendations: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub target_hashtag: String,
    pub recommendations: Vec<Recommendation>,
    pub min_cooccurrence_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EngineStatusResponse {
    pub total_hashtags: usize,
    pub total_buckets: usize,
    pub current_minute: i64,
    pub window_minutes: i64,
    pub retention_minutes: i64,
    pub cache_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    #[serde(default = "default_minutes_back")]
    pub minutes_back: i64,
}

const fn default_minutes_back() -> i64 {
    60
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub minutes_back: i64,
    pub rows: usize,
    pub buckets_written: usize,
    pub buckets_skipped: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepthResponse {
    pub post_id: i64,
    pub max_depth: usize,
    pub total_comments: usize,
    pub total_replies: usize,
    /// Rounded to two decimals
    pub average_replies_per_comment: f64,
}

impl DepthResponse {
    #[must_use]
    pub fn from_report(post_id: i64, report: &DepthReport) -> Self {
        Self {
            post_id,
            max_depth: report.max_depth,
            total_comments: report.total_comments,
            total_replies: report.total_replies,
            average_replies_per_comment: (report.average_replies_per_comment * 100.0).round()
                / 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViralResponse {
    pub post_id: i64,
    #[serde(flatten)]
    pub report: ViralChainReport,
    pub criteria: ViralCriteria,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentTreeResponse {
    pub post_id: i64,
    pub comments: Vec<CommentTreeNode>,
}

/// `POST /api/engagements` body
#[derive(Debug, Deserialize)]
pub struct EngagementRequest {
    pub user_id: i64,
    /// "post" or "comment"
    pub target_type: String,
    pub target_id: i64,
    /// "like", "share", "view" or "bookmark"
    pub kind: String,
    /// Bump the comment's upvotes on a like
    #[serde(default = "default_increment_counter")]
    pub increment_counter: bool,
}

const fn default_increment_counter() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_report_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct GrowthQuery {
    #[serde(default = "default_growth_hours")]
    pub hours: i64,
    #[serde(default = "default_report_limit")]
    pub limit: i64,
}

const fn default_report_limit() -> i64 {
    10
}

const fn default_growth_hours() -> i64 {
    24
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EngagedUsersResponse {
    pub users: Vec<EngagedUser>,
    pub total_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopHashtagsResponse {
    pub hashtags: Vec<HashtagReach>,
    pub total_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrowingHashtagsResponse {
    pub hashtags: Vec<GrowingHashtag>,
    pub period_start: DateTime<Utc>,
    pub period_hours: i64,
}

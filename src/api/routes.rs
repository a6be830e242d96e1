//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create `RESTful` API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/health/db", get(handlers::health_db))
        .route("/health/redis", get(handlers::health_redis))
        // Trending and recommendations
        .route("/hashtags/trending", get(handlers::get_trending_hashtags))
        .route(
            "/hashtags/recommend/:hashtag",
            get(handlers::get_hashtag_recommendations),
        )
        .route("/hashtags/status", get(handlers::get_engine_status))
        .route("/hashtags/sync", post(handlers::sync_trending))
        // Engagements
        .route("/engagements", post(handlers::create_engagement))
        // Comment analysis
        .route("/comments/depth/:post_id", get(handlers::get_comment_depth))
        .route("/comments/viral/:post_id", get(handlers::get_viral_chains))
        .route("/comments/tree/:post_id", get(handlers::get_comment_tree))
        // Reports
        .route(
            "/reports/most-engaged-users",
            get(handlers::get_most_engaged_users),
        )
        .route("/reports/top-hashtags", get(handlers::get_top_hashtags))
        .route(
            "/reports/fastest-growing-hashtags",
            get(handlers::get_fastest_growing_hashtags),
        )
        // Prometheus metrics
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
}

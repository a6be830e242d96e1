//! Trending, recommendation and sync handlers

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::check_range;
use super::error_status;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::EngineStatusResponse;
use crate::api::types::RecommendQuery;
use crate::api::types::RecommendationResponse;
use crate::api::types::SyncQuery;
use crate::api::types::SyncResponse;
use crate::api::types::TrendingQuery;
use crate::api::types::TrendingResponse;
use crate::trending::MAX_WINDOW_MINUTES;

/// GET /api/hashtags/trending?window=&k=
pub async fn get_trending_hashtags(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<TrendingResponse>>, StatusCode> {
    let engine = state.tagpulse.trending_engine();
    let window = check_range(
        "window",
        query.window.unwrap_or(engine.default_window_minutes()),
        1,
        MAX_WINDOW_MINUTES,
    )?;
    let k = check_range("k", query.k.unwrap_or(state.config.trending.default_k), 1, 100)?;

    let result = engine.top_cached(k, Some(window)).await;
    state.metrics.record_cache_outcome(result.outcome);

    let hashtags = result.snapshot.hashtags;
    Ok(Json(ApiResponse::success(TrendingResponse {
        total_count: hashtags.len(),
        hashtags,
        window_minutes: window,
    })))
}

/// GET /api/hashtags/recommend/:hashtag?max_recommendations=
pub async fn get_hashtag_recommendations(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<ApiResponse<RecommendationResponse>>, StatusCode> {
    let clean = hashtag.trim().trim_start_matches('#').to_string();
    if clean.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let max = check_range(
        "max_recommendations",
        query
            .max_recommendations
            .unwrap_or(state.config.recommendations.default_max_results),
        1,
        10,
    )?;

    let recommendations = state
        .tagpulse
        .recommend(&clean, max)
        .await
        .map_err(|e| error_status(&format!("Recommendations for #{clean}"), &e))?;

    Ok(Json(ApiResponse::success(RecommendationResponse {
        target_hashtag: clean,
        recommendations,
        min_cooccurrence_rate: state.tagpulse.recommender().min_cooccurrence_rate(),
    })))
}

/// GET /api/hashtags/status
pub async fn get_engine_status(
    State(state): State<AppState>,
) -> Json<ApiResponse<EngineStatusResponse>> {
    let engine = state.tagpulse.trending_engine();
    let status = engine.status();
    state.metrics.update_store_gauges(&status);

    Json(ApiResponse::success(EngineStatusResponse {
        total_hashtags: status.total_keys,
        total_buckets: status.total_buckets,
        current_minute: status.current_minute,
        window_minutes: engine.default_window_minutes(),
        retention_minutes: status.retention_window_minutes,
        cache_enabled: engine.has_cache(),
    }))
}

/// POST /api/hashtags/sync?minutes_back=
pub async fn sync_trending(
    State(state): State<AppState>,
    Query(query): Query<SyncQuery>,
) -> Result<Json<ApiResponse<SyncResponse>>, StatusCode> {
    let minutes_back = check_range("minutes_back", query.minutes_back, 1, MAX_WINDOW_MINUTES)?;
    info!("POST /api/hashtags/sync (minutes_back={})", minutes_back);

    let report = state
        .tagpulse
        .sync_trending(minutes_back)
        .await
        .map_err(|e| error_status("Trending sync", &e))?;
    state.metrics.sync_rows.inc_by(report.rows as u64);
    state
        .metrics
        .update_store_gauges(&state.tagpulse.trending_engine().status());

    Ok(Json(ApiResponse::success(SyncResponse {
        message: format!("Successfully synced trending data from last {minutes_back} minutes"),
        minutes_back,
        rows: report.rows,
        buckets_written: report.buckets_written,
        buckets_skipped: report.buckets_skipped,
    })))
}

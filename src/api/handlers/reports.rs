//! Aggregate report handlers

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::check_range;
use super::error_status;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::EngagedUsersResponse;
use crate::api::types::GrowingHashtagsResponse;
use crate::api::types::GrowthQuery;
use crate::api::types::LimitQuery;
use crate::api::types::TopHashtagsResponse;

/// GET /api/reports/most-engaged-users?limit=
pub async fn get_most_engaged_users(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<EngagedUsersResponse>>, StatusCode> {
    let limit = check_range("limit", query.limit, 1, 100)?;
    let users = state
        .tagpulse
        .database()
        .most_engaged_users(limit)
        .await
        .map_err(|e| error_status("Most engaged users report", &e))?;

    Ok(Json(ApiResponse::success(EngagedUsersResponse {
        total_count: users.len(),
        users,
    })))
}

/// GET /api/reports/top-hashtags?limit=
pub async fn get_top_hashtags(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<TopHashtagsResponse>>, StatusCode> {
    let limit = check_range("limit", query.limit, 1, 100)?;
    let hashtags = state
        .tagpulse
        .database()
        .top_hashtags_by_unique_users(limit)
        .await
        .map_err(|e| error_status("Top hashtags report", &e))?;

    Ok(Json(ApiResponse::success(TopHashtagsResponse {
        total_count: hashtags.len(),
        hashtags,
    })))
}

/// GET /api/reports/fastest-growing-hashtags?hours=&limit=
pub async fn get_fastest_growing_hashtags(
    State(state): State<AppState>,
    Query(query): Query<GrowthQuery>,
) -> Result<Json<ApiResponse<GrowingHashtagsResponse>>, StatusCode> {
    let hours = check_range("hours", query.hours, 1, 168)?;
    let limit = check_range("limit", query.limit, 1, 50)?;
    let since = chrono::Utc::now() - chrono::Duration::hours(hours);

    let hashtags = state
        .tagpulse
        .database()
        .fastest_growing_hashtags(since, limit)
        .await
        .map_err(|e| error_status("Fastest growing hashtags report", &e))?;

    Ok(Json(ApiResponse::success(GrowingHashtagsResponse {
        hashtags,
        period_start: since,
        period_hours: hours,
    })))
}

//! Engagement recording handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::check_range;
use super::error_status;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::EngagementRequest;
use crate::models::EngagementRecord;

/// POST /api/engagements
///
/// 400 on an unknown target type or kind, 404 when the user or target is
/// missing, 409 when the engagement is already recorded.
pub async fn create_engagement(
    State(state): State<AppState>,
    Json(request): Json<EngagementRequest>,
) -> Result<Json<ApiResponse<EngagementRecord>>, StatusCode> {
    let user_id = check_range("user_id", request.user_id, 1, i64::MAX)?;
    let target_id = check_range("target_id", request.target_id, 1, i64::MAX)?;

    let record = state
        .tagpulse
        .record_engagement(
            user_id,
            &request.target_type,
            target_id,
            &request.kind,
            request.increment_counter,
        )
        .await
        .map_err(|e| error_status("Engagement insert", &e))?;

    Ok(Json(ApiResponse::success(record)))
}

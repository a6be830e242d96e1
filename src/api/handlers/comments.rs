//! Comment analysis handlers

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::check_range;
use super::error_status;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::CommentTreeResponse;
use crate::api::types::DepthResponse;
use crate::api::types::ViralResponse;

/// GET /api/comments/depth/:post_id
pub async fn get_comment_depth(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<DepthResponse>>, StatusCode> {
    let post_id = check_range("post_id", post_id, 1, i64::MAX)?;
    let report = state
        .tagpulse
        .analyze_comment_depth(post_id)
        .await
        .map_err(|e| error_status("Comment depth analysis", &e))?;
    state.metrics.record_comment_analysis("depth");

    Ok(Json(ApiResponse::success(DepthResponse::from_report(
        post_id, &report,
    ))))
}

/// GET /api/comments/viral/:post_id
pub async fn get_viral_chains(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<ViralResponse>>, StatusCode> {
    let post_id = check_range("post_id", post_id, 1, i64::MAX)?;
    let report = state
        .tagpulse
        .detect_viral_chains(post_id)
        .await
        .map_err(|e| error_status("Viral chain detection", &e))?;
    state.metrics.record_comment_analysis("viral");

    Ok(Json(ApiResponse::success(ViralResponse {
        post_id,
        report,
        criteria: state.tagpulse.analyzer().criteria(),
    })))
}

/// GET /api/comments/tree/:post_id
pub async fn get_comment_tree(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<CommentTreeResponse>>, StatusCode> {
    let post_id = check_range("post_id", post_id, 1, i64::MAX)?;
    let comments = state
        .tagpulse
        .comment_tree(post_id)
        .await
        .map_err(|e| error_status("Comment tree", &e))?;
    state.metrics.record_comment_analysis("tree");

    Ok(Json(ApiResponse::success(CommentTreeResponse {
        post_id,
        comments,
    })))
}

//! Prometheus metrics endpoint handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use tracing::error;

use super::AppState;

/// Prometheus metrics endpoint handler
pub async fn get_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    state
        .metrics
        .update_store_gauges(&state.tagpulse.trending_engine().status());

    match state.metrics.export() {
        Ok(metrics_text) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/plain; version=0.0.4")
            .body(metrics_text)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?),
        Err(e) => {
            error!("Failed to export metrics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

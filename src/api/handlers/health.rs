use std::time::Duration;

use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::api::redis_client::RedisClient;
use crate::api::types::ApiResponse;
use crate::api::types::ComponentHealth;
use crate::api::types::DbHealthResponse;
use crate::api::types::HealthResponse;
use crate::api::types::RedisHealthResponse;
use crate::api::types::RedisOperations;

const ROUND_TRIP_KEY: &str = "health_check_test";
const ROUND_TRIP_VALUE: &str = "test_value";

async fn check_database(state: &AppState) -> ComponentHealth {
    match state.tagpulse.database().ping().await {
        Ok(()) => ComponentHealth::ok(),
        Err(e) => ComponentHealth::down(format!("Database error: {e}")),
    }
}

async fn check_redis(state: &AppState) -> ComponentHealth {
    match &state.redis {
        None => ComponentHealth::disabled(),
        Some(client) => match client.ping().await {
            Ok(()) => ComponentHealth::ok(),
            Err(e) => ComponentHealth::down(e.to_string()),
        },
    }
}

/// Health check handler
///
/// A database failure takes the service down; a configured but unreachable
/// Redis only degrades it.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let db = check_database(&state).await;
    let redis = check_redis(&state).await;

    Json(ApiResponse::success(HealthResponse {
        status: HealthResponse::overall_status(&db, &redis).to_string(),
        db,
        redis,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    }))
}

/// GET /api/health/db
pub async fn health_db(State(state): State<AppState>) -> Json<ApiResponse<DbHealthResponse>> {
    let mut health = check_database(&state).await;

    let tables = if health.is_down() {
        None
    } else {
        match state.tagpulse.database().table_row_counts().await {
            Ok(counts) => Some(counts),
            Err(e) => {
                health.error = Some(format!("Extended check failed: {e}"));
                None
            }
        }
    };

    Json(ApiResponse::success(DbHealthResponse {
        health,
        tables,
        timestamp: chrono::Utc::now(),
    }))
}

/// SET, GET and DEL a scratch key; the first failure is reported as the error
async fn redis_round_trip(client: &RedisClient) -> (RedisOperations, Option<String>) {
    let mut failure = None;

    let set = client
        .set_json_with_ttl(ROUND_TRIP_KEY, ROUND_TRIP_VALUE, Some(Duration::from_secs(60)))
        .await;
    let get = client.get_json(ROUND_TRIP_KEY).await;
    let delete = client.delete(ROUND_TRIP_KEY).await;

    let operations = RedisOperations {
        set: set.is_ok(),
        get: matches!(&get, Ok(Some(value)) if value == ROUND_TRIP_VALUE),
        delete: delete.is_ok(),
    };
    for result in [set, get.map(|_| ()), delete] {
        if let Err(e) = result {
            failure.get_or_insert_with(|| format!("Redis operations test failed: {e}"));
        }
    }
    (operations, failure)
}

/// GET /api/health/redis
pub async fn health_redis(
    State(state): State<AppState>,
) -> Json<ApiResponse<RedisHealthResponse>> {
    let mut health = check_redis(&state).await;

    let operations = match &state.redis {
        Some(client) if !health.is_down() => {
            let (operations, failure) = redis_round_trip(client).await;
            if failure.is_some() {
                health.error = failure;
            }
            Some(operations)
        }
        _ => None,
    };

    Json(ApiResponse::success(RedisHealthResponse {
        health,
        operations,
        timestamp: chrono::Utc::now(),
    }))
}

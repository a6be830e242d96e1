/// API request handlers
use std::sync::Arc;

use axum::http::StatusCode;
use tracing::error;
use tracing::warn;

use crate::api::metrics::Metrics;
use crate::api::redis_client::RedisClient;
use crate::TagPulse;
use crate::TagPulseError;

pub mod comments;
pub mod engagements;
pub mod hashtags;
pub mod health;
pub mod metrics;
pub mod reports;

pub use comments::*;
pub use engagements::*;
pub use hashtags::*;
pub use health::*;
pub use metrics::*;
pub use reports::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<crate::AppConfig>,
    pub tagpulse: Arc<TagPulse>,
    pub metrics: Arc<Metrics>,
    /// Only used for health checks; the trending cache holds its own handle
    pub redis: Option<Arc<RedisClient>>,
}

/// Map a service error onto an HTTP status, logging server-side failures
pub(crate) fn error_status(context: &str, err: &TagPulseError) -> StatusCode {
    match err {
        e if e.is_not_found() => {
            warn!("{}: {}", context, e);
            StatusCode::NOT_FOUND
        }
        TagPulseError::InvalidInput(msg) => {
            warn!("{}: invalid input: {}", context, msg);
            StatusCode::BAD_REQUEST
        }
        TagPulseError::DuplicateEngagement { .. } => {
            warn!("{}: {}", context, err);
            StatusCode::CONFLICT
        }
        e => {
            error!("{}: {}", context, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Reject `value` outside `min..=max`
pub(crate) fn check_range<T>(name: &str, value: T, min: T, max: T) -> Result<T, StatusCode>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        warn!("Rejected {}={} (allowed {}..={})", name, value, min, max);
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(value)
}

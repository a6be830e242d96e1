//! HTTP server implementation

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::metrics::Metrics;
use crate::api::redis_client::RedisClient;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;
use crate::TagPulse;
use crate::TagPulseError;

/// Access log middleware, also feeding request metrics
async fn access_log_middleware(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!("→ {} {}", method, uri);

    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!("← {} {}ms", response.status(), duration.as_millis());
    metrics.observe_request(
        method.as_str(),
        response.status().as_u16(),
        duration.as_secs_f64(),
    );

    response
}

/// Build the full application router around prepared state
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let metrics = state.metrics.clone();
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            access_log_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::debug_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
///
/// # Errors
/// Returns an error if the database is unreachable, metrics cannot be
/// registered, or the listener cannot bind
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("Starting tagpulse API server...");

    let metrics = Arc::new(
        Metrics::new().map_err(|e| TagPulseError::Custom(format!("Metrics init failed: {e}")))?,
    );
    info!("Metrics endpoint available at: http://{host}:{port}/api/metrics");

    let tagpulse = Arc::new(TagPulse::new(config).await?);
    info!("Database service initialized");

    if config.trending.sync_on_startup {
        match tagpulse.sync_trending(config.trending.sync_minutes_back).await {
            Ok(report) => {
                metrics.sync_rows.inc_by(report.rows as u64);
                info!(
                    "Startup sync loaded {} rows from the last {} minutes",
                    report.rows, config.trending.sync_minutes_back
                );
            }
            Err(e) => warn!("Startup trending sync failed, starting with empty counters: {}", e),
        }
    }

    let redis = match &config.redis {
        Some(redis_cfg) => Some(Arc::new(RedisClient::connect(redis_cfg)?)),
        None => None,
    };
    info!(
        "Trending cache: {}",
        if tagpulse.trending_engine().has_cache() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        tagpulse,
        metrics,
        redis,
    };

    let app = build_app(state, enable_cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health                           - Health check");
    info!("  GET  /api/hashtags/trending                - Trending hashtags");
    info!("  GET  /api/hashtags/recommend/:hashtag      - Co-occurrence recommendations");
    info!("  GET  /api/hashtags/status                  - Counter store status");
    info!("  POST /api/hashtags/sync                    - Reload counters from the database");
    info!("  GET  /api/comments/{{depth,viral,tree}}/:id  - Comment thread analysis");
    info!("  GET  /api/reports/*                        - Engagement and hashtag reports");
    info!("  GET  /api/metrics                          - Prometheus metrics");

    axum::serve(listener, app).await?;

    Ok(())
}

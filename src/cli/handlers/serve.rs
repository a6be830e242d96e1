//! API server handler

use crate::cli::output::print_header;
use crate::AppConfig;
use crate::Result;

/// Start the API server; CLI flags take priority over `[api]` settings
///
/// # Errors
/// Returns an error if the server fails to start
pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    use crate::api::serve_api;

    let host = host.unwrap_or_else(|| config.api.host.clone());
    let port = port.unwrap_or(config.api.port);
    let cors = cors || config.api.enable_cors;

    print_header("🚀 Starting tagpulse API Server");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!();

    serve_api(config, host, port, cors).await
}

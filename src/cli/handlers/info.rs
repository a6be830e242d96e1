//! Configuration display

use super::init::redact_url;
use crate::cli::output::print_header;
use crate::AppConfig;
use crate::Result;

/// Print the effective configuration
#[allow(clippy::unnecessary_wraps)]
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_header("📋 tagpulse configuration");

    println!("\n🗄️  Database");
    println!("  url:             {}", redact_url(config.database_url()));
    println!(
        "  connections:     {}..{}",
        config.min_connections(),
        config.max_connections()
    );
    println!("  timeout:         {}s", config.connection_timeout());

    println!("\n📈 Trending");
    println!("  default window:  {} min", config.default_window_minutes());
    println!("  retention:       {} min", config.retention_minutes());
    println!("  default k:       {}", config.trending.default_k);
    println!(
        "  startup sync:    {} ({} min back)",
        config.trending.sync_on_startup, config.trending.sync_minutes_back
    );

    println!("\n🏷️  Recommendations");
    println!("  min co-occurrence rate: {}", config.min_cooccurrence_rate());
    println!(
        "  default max results:    {}",
        config.recommendations.default_max_results
    );

    println!("\n💬 Comments");
    println!(
        "  viral: >= {} replies or >= {} upvotes",
        config.comments.viral_min_replies, config.comments.viral_min_upvotes
    );
    println!("  memoized depth:  {}", config.comments.memoize_depth);

    println!("\n🧊 Cache");
    println!("  enabled:         {}", config.cache_enabled());
    println!("  trending ttl:    {}s", config.trending_ttl_secs());
    match &config.redis {
        Some(redis) => println!(
            "  redis:           {} (namespace '{}')",
            redact_url(&redis.url),
            redis.namespace
        ),
        None => println!("  redis:           not configured, using in-process cache"),
    }

    println!("\n🌐 API");
    println!("  bind:            {}:{}", config.api.host, config.api.port);
    println!("  cors:            {}", config.api.enable_cors);

    println!("\n📝 Logging");
    println!("  level:           {}", config.logging.level);

    Ok(())
}

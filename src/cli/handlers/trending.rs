//! Trending counters, sync and recommendation handlers
//!
//! Counters live in process memory, so every command here loads recent posts
//! from the database before reading them.

use tracing::info;

use crate::cli::output::print_header;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::errors::Result;
use crate::trending::check_window_minutes;
use crate::TagPulse;

/// Print the top trending hashtags
///
/// # Errors
/// Returns an error if `window` is outside `1..=1440` or loading recent posts fails
pub async fn handle_trending_command(
    tagpulse: &TagPulse,
    k: Option<usize>,
    window: Option<i64>,
) -> Result<()> {
    let config = tagpulse.config();
    let k = k.unwrap_or(config.trending.default_k);
    let window = check_window_minutes(
        "window",
        window.unwrap_or_else(|| config.default_window_minutes()),
    )?;
    let minutes_back = window.max(config.trending.sync_minutes_back);

    info!("Loading posts from the last {minutes_back} minutes");
    let report = tagpulse.sync_trending(minutes_back).await?;
    info!(
        "Loaded {} rows into {} buckets",
        report.rows, report.buckets_written
    );

    let top = tagpulse.trending(k, Some(window));
    print_header(&format!("📈 Top {k} hashtags over the last {window} minutes"));
    if top.is_empty() {
        print_warning("No hashtag activity in this window");
        return Ok(());
    }
    for (rank, tally) in top.iter().enumerate() {
        println!("{:>3}. #{:<30} {}", rank + 1, tally.hashtag, tally.count);
    }
    Ok(())
}

/// Rebuild counters from the database and print the store status
///
/// # Errors
/// Returns an error if `minutes_back` is outside `1..=1440` or a query fails
pub async fn handle_sync_command(
    tagpulse: &TagPulse,
    minutes_back: i64,
    realtime: bool,
) -> Result<()> {
    let minutes_back = check_window_minutes("minutes_back", minutes_back)?;
    let report = tagpulse.sync_trending(minutes_back).await?;
    print_success(&format!(
        "Synced {} post/hashtag rows: {} buckets written, {} older than retention",
        report.rows, report.buckets_written, report.buckets_skipped
    ));

    if realtime {
        let applied = tagpulse.apply_realtime_updates().await?;
        print_info(&format!("Applied {applied} realtime hashtag updates"));
    }

    let status = tagpulse.trending_engine().status();
    print_header("📊 Counter store");
    println!("  hashtags tracked:  {}", status.total_keys);
    println!("  minute buckets:    {}", status.total_buckets);
    println!("  current minute:    {}", status.current_minute);
    println!("  retention:         {} min", status.retention_window_minutes);
    Ok(())
}

/// Print hashtags that co-occur with `hashtag`
///
/// # Errors
/// Returns an error if the hashtag is blank or a query fails
pub async fn handle_recommend_command(
    tagpulse: &TagPulse,
    hashtag: &str,
    max: Option<usize>,
) -> Result<()> {
    let name = hashtag.trim().trim_start_matches('#');
    if name.is_empty() {
        return Err(crate::TagPulseError::InvalidInput(
            "hashtag must not be empty".to_string(),
        ));
    }
    let max = max.unwrap_or(tagpulse.config().recommendations.default_max_results);

    let recommendations = tagpulse.recommend(name, max).await?;
    print_header(&format!("🏷️  Recommendations for #{name}"));
    if recommendations.is_empty() {
        print_warning(&format!(
            "No hashtag co-occurs on at least {:.0}% of #{name} posts",
            tagpulse.recommender().min_cooccurrence_rate() * 100.0
        ));
        return Ok(());
    }
    for rec in &recommendations {
        println!(
            "  #{:<30} {:>5.1}%",
            rec.hashtag,
            rec.cooccurrence_rate * 100.0
        );
    }
    Ok(())
}

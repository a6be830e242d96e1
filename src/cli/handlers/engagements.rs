//! Engagement recording handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::errors::Result;
use crate::TagPulse;

/// Record one engagement and print what was stored
///
/// # Errors
/// Returns an error for unknown names, missing rows, duplicates or failed queries
pub async fn handle_engage_command(
    tagpulse: &TagPulse,
    user_id: i64,
    target_type: &str,
    target_id: i64,
    kind: &str,
    increment_counter: bool,
) -> Result<()> {
    let record = tagpulse
        .record_engagement(user_id, target_type, target_id, kind, increment_counter)
        .await?;

    print_success(&format!(
        "Recorded {} by user {} on {} {} (engagement #{})",
        record.kind.as_str(),
        record.user_id,
        record.target_type.as_str(),
        record.target_id,
        record.engagement_id
    ));
    if record.counter_updated {
        print_info(&format!("Comment {} upvotes +1", record.target_id));
    }
    Ok(())
}

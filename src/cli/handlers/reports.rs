//! Aggregate report handlers

use crate::cli::commands::ReportCommands;
use crate::cli::output::print_header;
use crate::cli::output::print_warning;
use crate::errors::Result;
use crate::TagPulse;
use crate::TagPulseError;

fn check_limit(limit: i64, max: i64) -> Result<i64> {
    if (1..=max).contains(&limit) {
        Ok(limit)
    } else {
        Err(TagPulseError::InvalidInput(format!(
            "limit must be between 1 and {max}, got {limit}"
        )))
    }
}

/// Dispatch `reports` subcommands
///
/// # Errors
/// Returns an error for out-of-range arguments or failed queries
pub async fn handle_report_command(tagpulse: &TagPulse, command: &ReportCommands) -> Result<()> {
    let db = tagpulse.database();
    match command {
        ReportCommands::EngagedUsers { limit } => {
            let users = db.most_engaged_users(check_limit(*limit, 100)?).await?;
            print_header("🙌 Most engaged users");
            if users.is_empty() {
                print_warning("No engagements recorded");
            }
            for (rank, user) in users.iter().enumerate() {
                println!(
                    "{:>3}. @{:<24} {:>6} total ({} on posts, {} on comments)",
                    rank + 1,
                    user.handle,
                    user.total_engagements,
                    user.post_engagements,
                    user.comment_engagements
                );
            }
        }
        ReportCommands::TopHashtags { limit } => {
            let hashtags = db
                .top_hashtags_by_unique_users(check_limit(*limit, 100)?)
                .await?;
            print_header("🏷️  Hashtags by unique users");
            if hashtags.is_empty() {
                print_warning("No hashtags in use");
            }
            for (rank, tag) in hashtags.iter().enumerate() {
                println!(
                    "{:>3}. #{:<30} {:>6} users {:>6} posts",
                    rank + 1,
                    tag.hashtag_name,
                    tag.unique_users,
                    tag.total_posts
                );
            }
        }
        ReportCommands::FastestGrowing { hours, limit } => {
            if !(1..=168).contains(hours) {
                return Err(TagPulseError::InvalidInput(format!(
                    "hours must be between 1 and 168, got {hours}"
                )));
            }
            let since = chrono::Utc::now() - chrono::Duration::hours(*hours);
            let hashtags = db
                .fastest_growing_hashtags(since, check_limit(*limit, 50)?)
                .await?;
            print_header(&format!("🚀 Fastest growing hashtags, last {hours}h"));
            if hashtags.is_empty() {
                print_warning("No hashtag has enough recent posts");
            }
            for (rank, tag) in hashtags.iter().enumerate() {
                println!(
                    "{:>3}. #{:<30} {:>5.1}% ({} of {} posts, {} users)",
                    rank + 1,
                    tag.hashtag_name,
                    tag.growth_rate * 100.0,
                    tag.recent_posts,
                    tag.total_posts,
                    tag.recent_unique_users
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_bounded() {
        assert_eq!(check_limit(1, 100).ok(), Some(1));
        assert_eq!(check_limit(100, 100).ok(), Some(100));
        assert!(matches!(
            check_limit(0, 100),
            Err(TagPulseError::InvalidInput(_))
        ));
        assert!(check_limit(51, 50).is_err());
    }
}

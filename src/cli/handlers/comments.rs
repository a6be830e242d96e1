//! Comment thread analysis handlers

use crate::cli::commands::CommentCommands;
use crate::cli::output::print_comment_tree;
use crate::cli::output::print_header;
use crate::cli::output::print_warning;
use crate::comments::CommentAnalyzer;
use crate::errors::Result;
use crate::TagPulse;

/// Dispatch `comments` subcommands
///
/// # Errors
/// Returns `PostNotFound` for unknown posts, or a database error
pub async fn handle_comment_command(tagpulse: &TagPulse, command: &CommentCommands) -> Result<()> {
    match command {
        CommentCommands::Depth { post_id } => handle_depth(tagpulse, *post_id).await,
        CommentCommands::Viral {
            post_id,
            min_replies,
            min_upvotes,
        } => handle_viral(tagpulse, *post_id, *min_replies, *min_upvotes).await,
        CommentCommands::Tree { post_id, json } => handle_tree(tagpulse, *post_id, *json).await,
    }
}

async fn handle_depth(tagpulse: &TagPulse, post_id: i64) -> Result<()> {
    let report = tagpulse.analyze_comment_depth(post_id).await?;
    print_header(&format!("💬 Comment depth for post {post_id}"));
    println!("  comments:          {}", report.total_comments);
    println!("  replies:           {}", report.total_replies);
    println!("  max depth:         {}", report.max_depth);
    println!(
        "  replies/comment:   {:.2}",
        report.average_replies_per_comment
    );
    Ok(())
}

async fn handle_viral(
    tagpulse: &TagPulse,
    post_id: i64,
    min_replies: Option<usize>,
    min_upvotes: Option<i64>,
) -> Result<()> {
    let defaults = tagpulse.analyzer().criteria();
    let criteria = (
        min_replies.unwrap_or(defaults.min_replies),
        min_upvotes.unwrap_or(defaults.min_upvotes),
    );

    let report = if criteria == (defaults.min_replies, defaults.min_upvotes) {
        tagpulse.detect_viral_chains(post_id).await?
    } else {
        let comments = tagpulse.database().fetch_comments_for_post(post_id).await?;
        CommentAnalyzer::new(criteria.0, criteria.1).detect_viral_chains(&comments)
    };

    print_header(&format!("🔥 Viral chains for post {post_id}"));
    println!(
        "  criteria:          >= {} replies or >= {} upvotes",
        criteria.0, criteria.1
    );
    if !report.viral_criteria_met {
        print_warning("No chain of two or more viral comments");
        return Ok(());
    }
    println!("  chains:            {}", report.total_viral_chains);
    println!("  longest:           {}", report.longest_chain_length);
    let ids: Vec<String> = report
        .longest_chain_comments
        .iter()
        .map(|id| format!("#{id}"))
        .collect();
    println!("  path:              {}", ids.join(" → "));
    Ok(())
}

async fn handle_tree(tagpulse: &TagPulse, post_id: i64, json: bool) -> Result<()> {
    let tree = tagpulse.comment_tree(post_id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    print_header(&format!("🌳 Comment tree for post {post_id}"));
    if tree.is_empty() {
        print_warning("Post has no comments");
        return Ok(());
    }
    print_comment_tree(&tree);
    Ok(())
}

//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "tagpulse")]
#[command(about = "Hashtag trending and comment thread analytics for social posts")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create tables and indexes
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show current configuration
    Config,
    /// Start servers
    #[command(subcommand)]
    Serve(ServeCommands),
    /// Load recent posts and print the top trending hashtags
    Trending {
        /// Number of hashtags to show
        #[arg(short, long)]
        k: Option<usize>,
        /// Window in minutes (defaults to the configured window)
        #[arg(short, long)]
        window: Option<i64>,
    },
    /// Rebuild trending counters from recent posts and print store status
    Sync {
        /// How far back to load posts, in minutes
        #[arg(short, long, default_value = "60")]
        minutes_back: i64,
        /// Also apply the last minute of posts as a realtime update
        #[arg(long)]
        realtime: bool,
    },
    /// Recommend hashtags that co-occur with the given one
    Recommend {
        /// Hashtag name, with or without a leading '#'
        hashtag: String,
        /// Maximum number of recommendations
        #[arg(short, long)]
        max: Option<usize>,
    },
    /// Record an engagement in one transaction
    Engage {
        user_id: i64,
        /// "post" or "comment"
        target_type: String,
        target_id: i64,
        /// "like", "share", "view" or "bookmark"
        kind: String,
        /// Do not bump the comment's upvotes on a like
        #[arg(long)]
        no_counter: bool,
    },
    /// Comment thread analysis for a post
    #[command(subcommand)]
    Comments(CommentCommands),
    /// Engagement and hashtag reports
    #[command(subcommand)]
    Reports(ReportCommands),
}

#[derive(Subcommand)]
pub enum ServeCommands {
    /// Start RESTful API server
    Api {
        /// Host to bind to (defaults to [api].host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to [api].port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS
        #[arg(long, action = clap::ArgAction::SetTrue)]
        cors: bool,
    },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Maximum depth and reply statistics
    Depth {
        post_id: i64,
    },
    /// Longest chain of viral comments
    Viral {
        post_id: i64,
        /// Override the minimum direct replies for a viral comment
        #[arg(long)]
        min_replies: Option<usize>,
        /// Override the minimum upvotes for a viral comment
        #[arg(long)]
        min_upvotes: Option<i64>,
    },
    /// Nested comment tree
    Tree {
        post_id: i64,
        /// Print the tree as JSON instead of indented text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Users whose content received the most engagement
    EngagedUsers {
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
    /// Hashtags used by the most distinct users
    TopHashtags {
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
    /// Hashtags with the largest share of recent posts
    FastestGrowing {
        /// Size of the recent period in hours
        #[arg(long, default_value = "24")]
        hours: i64,
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_viral_overrides() {
        let cli = Cli::parse_from([
            "tagpulse",
            "comments",
            "viral",
            "42",
            "--min-replies",
            "2",
        ]);
        match cli.command {
            Commands::Comments(CommentCommands::Viral {
                post_id,
                min_replies,
                min_upvotes,
            }) => {
                assert_eq!(post_id, 42);
                assert_eq!(min_replies, Some(2));
                assert_eq!(min_upvotes, None);
            }
            _ => panic!("expected comments viral"),
        }
    }

    #[test]
    fn report_limits_default_to_ten() {
        let cli = Cli::parse_from(["tagpulse", "reports", "fastest-growing"]);
        match cli.command {
            Commands::Reports(ReportCommands::FastestGrowing { hours, limit }) => {
                assert_eq!(hours, 24);
                assert_eq!(limit, 10);
            }
            _ => panic!("expected reports fastest-growing"),
        }
    }

    #[test]
    fn parses_engage_arguments() {
        let cli = Cli::parse_from(["tagpulse", "engage", "1", "comment", "4", "like"]);
        match cli.command {
            Commands::Engage {
                user_id,
                target_type,
                target_id,
                kind,
                no_counter,
            } => {
                assert_eq!(user_id, 1);
                assert_eq!(target_type, "comment");
                assert_eq!(target_id, 4);
                assert_eq!(kind, "like");
                assert!(!no_counter);
            }
            _ => panic!("expected engage"),
        }
    }
}

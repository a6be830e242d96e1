use clap::Parser;
use tagpulse::cli::Cli;
use tagpulse::cli::Commands;
use tagpulse::cli::ServeCommands;
use tagpulse::AppConfig;
use tagpulse::Result;
use tagpulse::TagPulse;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    if cli.verbose {
        tagpulse::logging::init_logging_with_level("debug")?;
    } else {
        tagpulse::logging::init_logging_with_config(&config)?;
    }
    tracing::debug!("Configuration loaded successfully");

    // Commands that never touch the database
    match &cli.command {
        Commands::Config => return tagpulse::cli::handle_config_command(&config),
        Commands::Serve(ServeCommands::Api { host, port, cors }) => {
            return tagpulse::cli::handle_serve_api(&config, host.clone(), *port, *cors).await;
        }
        _ => {}
    }

    let tagpulse = TagPulse::new(&config).await?;

    match cli.command {
        Commands::Init { force } => {
            tagpulse::cli::handle_init_command(&tagpulse, force).await?;
        }
        Commands::Trending { k, window } => {
            tagpulse::cli::handle_trending_command(&tagpulse, k, window).await?;
        }
        Commands::Sync {
            minutes_back,
            realtime,
        } => {
            tagpulse::cli::handle_sync_command(&tagpulse, minutes_back, realtime).await?;
        }
        Commands::Recommend { hashtag, max } => {
            tagpulse::cli::handle_recommend_command(&tagpulse, &hashtag, max).await?;
        }
        Commands::Engage {
            user_id,
            target_type,
            target_id,
            kind,
            no_counter,
        } => {
            tagpulse::cli::handle_engage_command(
                &tagpulse,
                user_id,
                &target_type,
                target_id,
                &kind,
                !no_counter,
            )
            .await?;
        }
        Commands::Comments(command) => {
            tagpulse::cli::handle_comment_command(&tagpulse, &command).await?;
        }
        Commands::Reports(command) => {
            tagpulse::cli::handle_report_command(&tagpulse, &command).await?;
        }
        Commands::Config | Commands::Serve(_) => {}
    }

    Ok(())
}

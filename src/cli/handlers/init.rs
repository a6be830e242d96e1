//! Schema initialization handler

use std::io::Write;
use std::io::{
    self,
};

use crate::cli::output::print_success;
use crate::errors::Result;
use crate::TagPulse;

/// Create tables and indexes, asking for confirmation unless `force` is set
///
/// # Errors
/// Returns an error if reading the prompt answer or creating the schema fails
pub async fn handle_init_command(tagpulse: &TagPulse, force: bool) -> Result<()> {
    if !force {
        println!("This creates the users, posts, hashtags, post_hashtags, comments and engagements tables");
        println!("in {}", redact_url(tagpulse.config().database_url()));
        print!("Continue? [y/N] ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("❌ Aborted");
            return Ok(());
        }
    }

    tagpulse.init_database().await?;
    print_success("Database schema ready");
    Ok(())
}

/// Hide the password part of a connection URL
#[must_use]
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

//! Database layer for `PostgreSQL` operations
//!
//! The analytics engines never touch storage themselves; this module is the
//! collaborator they are fed from. It covers:
//!
//! - Schema creation for users, posts, hashtags, comments and engagements
//! - Comment fetches for thread analysis
//! - Recent post/hashtag rows for trending sync
//! - Hashtag totals and co-occurrence counts for recommendations
//! - Aggregate reports (engaged users, hashtag reach, growth)
//! - Transactional engagement inserts
//! - Table row counts for health checks
//!
//! # Connection Pool
//!
//! Connection pooling is managed by `sqlx::PgPool` with configurable:
//! - Maximum connections
//! - Minimum connections
//! - Connection timeout
//!
//! # Examples
//!
//! ```rust,no_run
//! use tagpulse::{AppConfig, Database};
//!
//! # async fn example() -> tagpulse::Result<()> {
//! let config = AppConfig::load()?;
//! let database = Database::from_config(&config).await?;
//! database.init_schema().await?;
//!
//! let comments = database.fetch_comments_for_post(1).await?;
//! println!("{} comments", comments.len());
//! # Ok(())
//! # }
//! ```

use sqlx::PgPool;

use crate::Result;

mod comments;
mod engagements;
mod hashtags;
mod posts;
mod reports;
mod schema;

pub use reports::EngagedUser;
pub use reports::GrowingHashtag;
pub use reports::HashtagReach;
pub use schema::TableRowCounts;

/// Database connection pool wrapper
///
/// This type is `Clone` and thread-safe. Cloning creates a new reference to the same
/// connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new database instance from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect within the configured timeout
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(config.database_url()).await?;

        tracing::debug!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }

    /// Round-trip a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

//! Schema initialization

use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use super::Database;
use crate::Result;

/// Row counts reported by the database health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TableRowCounts {
    pub users: i64,
    pub posts: i64,
    pub hashtags: i64,
    pub comments: i64,
    pub engagements: i64,
}

const SCHEMA_STATEMENTS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        handle VARCHAR(64) NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS posts (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS hashtags (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS post_hashtags (
        post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        hashtag_id BIGINT NOT NULL REFERENCES hashtags(id) ON DELETE CASCADE,
        PRIMARY KEY (post_id, hashtag_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS comments (
        id BIGSERIAL PRIMARY KEY,
        post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
        parent_id BIGINT REFERENCES comments(id) ON DELETE CASCADE,
        body TEXT NOT NULL,
        upvotes INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS engagements (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
        target_type VARCHAR(16) NOT NULL CHECK (target_type IN ('post', 'comment')),
        target_id BIGINT NOT NULL,
        kind VARCHAR(16) NOT NULL CHECK (kind IN ('like', 'share', 'view', 'bookmark')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_posts_user_created ON posts (user_id, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_posthashtags_tag_post ON post_hashtags (hashtag_id, post_id)",
    "CREATE INDEX IF NOT EXISTS idx_posthashtags_post ON post_hashtags (post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_parent ON comments (parent_id)",
    "CREATE INDEX IF NOT EXISTS idx_engagements_target ON engagements (target_type, target_id, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_engagements_user ON engagements (user_id, created_at)",
];

impl Database {
    /// Create tables and indexes that do not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready ({} statements)", SCHEMA_STATEMENTS.len());
        Ok(())
    }

    /// Count the rows of the main tables in one round-trip
    ///
    /// # Errors
    ///
    /// Returns an error if a table is missing or the query fails
    pub async fn table_row_counts(&self) -> Result<TableRowCounts> {
        let counts = sqlx::query_as::<_, TableRowCounts>(
            r"
            SELECT
                (SELECT COUNT(*) FROM users)::bigint AS users,
                (SELECT COUNT(*) FROM posts)::bigint AS posts,
                (SELECT COUNT(*) FROM hashtags)::bigint AS hashtags,
                (SELECT COUNT(*) FROM comments)::bigint AS comments,
                (SELECT COUNT(*) FROM engagements)::bigint AS engagements
            ",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}

//! Aggregate engagement and hashtag reports
//!
//! - Users ranked by engagements received on their posts and comments
//! - Hashtags ranked by distinct posting users
//! - Hashtags ranked by the share of their posts that are recent

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Database;
use crate::Result;

/// Hashtags need this many recent posts to count as growing
const MIN_RECENT_POSTS: i64 = 2;
/// ...and this many posts overall
const MIN_TOTAL_POSTS: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EngagedUser {
    pub user_id: i64,
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub total_engagements: i64,
    pub post_engagements: i64,
    pub comment_engagements: i64,
    pub posts_count: i64,
    pub comments_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HashtagReach {
    pub hashtag_id: i64,
    pub hashtag_name: String,
    pub unique_users: i64,
    pub total_posts: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GrowingHashtag {
    pub hashtag_id: i64,
    pub hashtag_name: String,
    pub recent_posts: i64,
    pub total_posts: i64,
    /// Recent posts divided by all posts
    pub growth_rate: f64,
    pub recent_unique_users: i64,
}

impl Database {
    /// Users ranked by engagements received on their content
    ///
    /// Users with no engagement are left out; ties break on handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn most_engaged_users(&self, limit: i64) -> Result<Vec<EngagedUser>> {
        let rows = sqlx::query_as::<_, EngagedUser>(
            r"
            SELECT
                u.id AS user_id,
                u.handle,
                u.created_at,
                (COALESCE(pe.total, 0) + COALESCE(ce.total, 0))::bigint AS total_engagements,
                COALESCE(pe.total, 0)::bigint AS post_engagements,
                COALESCE(ce.total, 0)::bigint AS comment_engagements,
                COALESCE(pc.count, 0)::bigint AS posts_count,
                COALESCE(cc.count, 0)::bigint AS comments_count
            FROM users u
            LEFT JOIN (
                SELECT p.user_id, COUNT(*) AS total
                FROM engagements e
                JOIN posts p ON e.target_id = p.id AND e.target_type = 'post'
                GROUP BY p.user_id
            ) pe ON pe.user_id = u.id
            LEFT JOIN (
                SELECT c.user_id, COUNT(*) AS total
                FROM engagements e
                JOIN comments c ON e.target_id = c.id AND e.target_type = 'comment'
                WHERE c.user_id IS NOT NULL
                GROUP BY c.user_id
            ) ce ON ce.user_id = u.id
            LEFT JOIN (
                SELECT user_id, COUNT(*) AS count FROM posts GROUP BY user_id
            ) pc ON pc.user_id = u.id
            LEFT JOIN (
                SELECT user_id, COUNT(*) AS count
                FROM comments
                WHERE user_id IS NOT NULL
                GROUP BY user_id
            ) cc ON cc.user_id = u.id
            WHERE COALESCE(pe.total, 0) + COALESCE(ce.total, 0) > 0
            ORDER BY total_engagements DESC, u.handle ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Hashtags ranked by distinct users, then total posts, then name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn top_hashtags_by_unique_users(&self, limit: i64) -> Result<Vec<HashtagReach>> {
        let rows = sqlx::query_as::<_, HashtagReach>(
            r"
            SELECT
                h.id AS hashtag_id,
                h.name AS hashtag_name,
                COUNT(DISTINCT p.user_id)::bigint AS unique_users,
                COUNT(ph.post_id)::bigint AS total_posts
            FROM hashtags h
            JOIN post_hashtags ph ON ph.hashtag_id = h.id
            JOIN posts p ON p.id = ph.post_id
            GROUP BY h.id, h.name
            ORDER BY unique_users DESC, total_posts DESC, h.name ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Hashtags whose posts are mostly recent
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn fastest_growing_hashtags(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<GrowingHashtag>> {
        let rows = sqlx::query_as::<_, GrowingHashtag>(
            r"
            SELECT
                h.id AS hashtag_id,
                h.name AS hashtag_name,
                recent.count AS recent_posts,
                total.count AS total_posts,
                CASE WHEN total.count > 0
                    THEN recent.count::float8 / total.count
                    ELSE 0
                END::float8 AS growth_rate,
                recent.unique_users AS recent_unique_users
            FROM hashtags h
            JOIN (
                SELECT ph.hashtag_id,
                       COUNT(*)::bigint AS count,
                       COUNT(DISTINCT p.user_id)::bigint AS unique_users
                FROM post_hashtags ph
                JOIN posts p ON p.id = ph.post_id
                WHERE p.created_at >= $1
                GROUP BY ph.hashtag_id
                HAVING COUNT(*) >= $2
            ) recent ON recent.hashtag_id = h.id
            JOIN (
                SELECT hashtag_id, COUNT(*)::bigint AS count
                FROM post_hashtags
                GROUP BY hashtag_id
            ) total ON total.hashtag_id = h.id
            WHERE total.count >= $3
            ORDER BY growth_rate DESC, recent.count DESC, h.name ASC
            LIMIT $4
            ",
        )
        .bind(since)
        .bind(MIN_RECENT_POSTS)
        .bind(MIN_TOTAL_POSTS)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

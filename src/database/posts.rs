use chrono::DateTime;
use chrono::Utc;

use super::Database;
use crate::models::HashtagCount;
use crate::models::PostHashtagRow;
use crate::Result;

impl Database {
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn post_exists(&self, post_id: i64) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// One row per (post, hashtag) for posts created at or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn fetch_recent_posts_with_hashtags(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PostHashtagRow>> {
        let rows = sqlx::query_as::<_, PostHashtagRow>(
            r"
            SELECT p.created_at AS post_created_at, h.name AS hashtag_name
            FROM posts p
            JOIN post_hashtags ph ON ph.post_id = p.id
            JOIN hashtags h ON h.id = ph.hashtag_id
            WHERE p.created_at >= $1
            ORDER BY p.created_at ASC
            ",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Posts per hashtag created at or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn fetch_recent_hashtag_counts(&self, since: DateTime<Utc>) -> Result<Vec<HashtagCount>> {
        let rows = sqlx::query_as::<_, HashtagCount>(
            r"
            SELECT h.name AS hashtag_name, COUNT(p.id)::bigint AS count
            FROM hashtags h
            JOIN post_hashtags ph ON ph.hashtag_id = h.id
            JOIN posts p ON p.id = ph.post_id
            WHERE p.created_at >= $1
            GROUP BY h.name
            ORDER BY h.name ASC
            ",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

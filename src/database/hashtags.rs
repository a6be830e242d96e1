use async_trait::async_trait;

use super::Database;
use crate::models::CooccurrenceCount;
use crate::trending::CooccurrenceSource;
use crate::Result;

impl Database {
    /// Number of posts carrying `name`, or `None` when the hashtag does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn hashtag_total_post_count(&self, name: &str) -> Result<Option<i64>> {
        let hashtag_id = sqlx::query_scalar::<_, i64>("SELECT id FROM hashtags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        let Some(hashtag_id) = hashtag_id else {
            return Ok(None);
        };

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(post_id)::bigint FROM post_hashtags WHERE hashtag_id = $1",
        )
        .bind(hashtag_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(total))
    }

    /// For every other hashtag, the number of posts shared with `name`
    ///
    /// Ordered by count descending, then name ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn fetch_cooccurring_hashtag_counts(&self, name: &str) -> Result<Vec<CooccurrenceCount>> {
        let rows = sqlx::query_as::<_, CooccurrenceCount>(
            r"
            SELECT h.name AS hashtag_name, COUNT(DISTINCT ph1.post_id)::bigint AS count
            FROM hashtags target
            JOIN post_hashtags ph1 ON ph1.hashtag_id = target.id
            JOIN post_hashtags ph2 ON ph2.post_id = ph1.post_id AND ph2.hashtag_id != target.id
            JOIN hashtags h ON h.id = ph2.hashtag_id
            WHERE target.name = $1
            GROUP BY h.id, h.name
            ORDER BY count DESC, h.name ASC
            ",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CooccurrenceSource for Database {
    async fn hashtag_total_post_count(&self, hashtag: &str) -> Result<Option<i64>> {
        Self::hashtag_total_post_count(self, hashtag).await
    }

    async fn cooccurring_hashtag_counts(&self, hashtag: &str) -> Result<Vec<CooccurrenceCount>> {
        self.fetch_cooccurring_hashtag_counts(hashtag).await
    }
}

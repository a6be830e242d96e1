use super::Database;
use crate::models::CommentNode;
use crate::Result;
use crate::TagPulseError;

impl Database {
    /// All comments on a post, oldest first
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if the post does not exist (checked before fetching)
    /// - Database errors
    pub async fn fetch_comments_for_post(&self, post_id: i64) -> Result<Vec<CommentNode>> {
        if !self.post_exists(post_id).await? {
            return Err(TagPulseError::PostNotFound(post_id));
        }

        let comments = sqlx::query_as::<_, CommentNode>(
            r"
            SELECT id, post_id, parent_id, user_id, body, upvotes::bigint AS upvotes, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Fetched {} comments for post {}", comments.len(), post_id);
        Ok(comments)
    }
}

//! Recording engagements

use chrono::DateTime;
use chrono::Utc;
use tracing::debug;
use tracing::info;

use super::Database;
use crate::models::EngagementKind;
use crate::models::EngagementRecord;
use crate::models::EngagementTarget;
use crate::Result;
use crate::TagPulseError;

impl Database {
    /// Record that `user_id` engaged with a post or comment.
    ///
    /// Everything runs in one transaction: the target and the user must
    /// exist, the same `(user, target, kind)` must not be recorded yet, and a
    /// `like` on a comment also bumps that comment's upvotes when
    /// `increment_counter` is set. Nothing is written if any step fails.
    ///
    /// # Errors
    /// - `PostNotFound` / `CommentNotFound` if the target does not exist
    /// - `UserNotFound` if the user does not exist
    /// - `DuplicateEngagement` if the engagement is already recorded
    /// - Database errors
    pub async fn insert_engagement(
        &self,
        user_id: i64,
        target_type: EngagementTarget,
        target_id: i64,
        kind: EngagementKind,
        increment_counter: bool,
    ) -> Result<EngagementRecord> {
        let mut tx = self.pool.begin().await?;

        let target_exists = match target_type {
            EngagementTarget::Post => {
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                    .bind(target_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
            EngagementTarget::Comment => {
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)",
                )
                .bind(target_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };
        if !target_exists {
            return Err(match target_type {
                EngagementTarget::Post => TagPulseError::PostNotFound(target_id),
                EngagementTarget::Comment => TagPulseError::CommentNotFound(target_id),
            });
        }

        // Row lock serializes concurrent engagements by the same user, so the
        // duplicate check below cannot race
        let user = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_none() {
            return Err(TagPulseError::UserNotFound(user_id));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM engagements
                WHERE user_id = $1 AND target_type = $2 AND target_id = $3 AND kind = $4
            )
            ",
        )
        .bind(user_id)
        .bind(target_type.as_str())
        .bind(target_id)
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(TagPulseError::DuplicateEngagement {
                user_id,
                kind: kind.as_str().to_string(),
                target_type: target_type.as_str().to_string(),
                target_id,
            });
        }

        let (engagement_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r"
            INSERT INTO engagements (user_id, target_type, target_id, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            ",
        )
        .bind(user_id)
        .bind(target_type.as_str())
        .bind(target_id)
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut counter_updated = false;
        if increment_counter
            && target_type == EngagementTarget::Comment
            && kind == EngagementKind::Like
        {
            let result = sqlx::query("UPDATE comments SET upvotes = upvotes + 1 WHERE id = $1")
                .bind(target_id)
                .execute(&mut *tx)
                .await?;
            counter_updated = result.rows_affected() == 1;
            debug!("Bumped upvotes of comment {}", target_id);
        }

        tx.commit().await?;
        info!(
            "Recorded {} by user {} on {} {} (engagement {})",
            kind.as_str(),
            user_id,
            target_type.as_str(),
            target_id,
            engagement_id
        );

        Ok(EngagementRecord {
            engagement_id,
            user_id,
            target_type,
            target_id,
            kind,
            created_at,
            counter_updated,
        })
    }
}

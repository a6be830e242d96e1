//! Engagement insert tests against a real database
//!
//! Run with a reachable PostgreSQL configured in `config.toml` (or via
//! `TAGPULSE_CONFIG`): `cargo test --test engagement_tests -- --ignored`

use tagpulse::AppConfig;
use tagpulse::Database;
use tagpulse::EngagementKind;
use tagpulse::EngagementTarget;
use tagpulse::TagPulseError;

struct Fixture {
    db: Database,
    user_id: i64,
    post_id: i64,
    comment_id: i64,
}

async fn fixture() -> Fixture {
    let config = AppConfig::load().expect("config");
    let db = Database::from_config(&config).await.expect("database");
    db.init_schema().await.expect("schema");

    let handle = format!("engage_{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
    let user_id: i64 = sqlx::query_scalar("INSERT INTO users (handle) VALUES ($1) RETURNING id")
        .bind(&handle)
        .fetch_one(db.pool())
        .await
        .expect("user");
    let post_id: i64 =
        sqlx::query_scalar("INSERT INTO posts (user_id, content) VALUES ($1, 'hello') RETURNING id")
            .bind(user_id)
            .fetch_one(db.pool())
            .await
            .expect("post");
    let comment_id: i64 = sqlx::query_scalar(
        "INSERT INTO comments (post_id, user_id, body, upvotes) VALUES ($1, $2, 'nice', 5) RETURNING id",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(db.pool())
    .await
    .expect("comment");

    Fixture {
        db,
        user_id,
        post_id,
        comment_id,
    }
}

async fn upvotes(db: &Database, comment_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT upvotes::bigint FROM comments WHERE id = $1")
        .bind(comment_id)
        .fetch_one(db.pool())
        .await
        .expect("upvotes")
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_bookmark_on_post_is_stored() {
    let f = fixture().await;

    let record = f
        .db
        .insert_engagement(
            f.user_id,
            EngagementTarget::Post,
            f.post_id,
            EngagementKind::Bookmark,
            false,
        )
        .await
        .expect("insert");

    assert_eq!(record.user_id, f.user_id);
    assert_eq!(record.target_type, EngagementTarget::Post);
    assert_eq!(record.target_id, f.post_id);
    assert!(!record.counter_updated);

    let (kind, target_type): (String, String) =
        sqlx::query_as("SELECT kind, target_type FROM engagements WHERE id = $1")
            .bind(record.engagement_id)
            .fetch_one(f.db.pool())
            .await
            .expect("stored row");
    assert_eq!(kind, "bookmark");
    assert_eq!(target_type, "post");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_like_on_comment_bumps_upvotes() {
    let f = fixture().await;
    let before = upvotes(&f.db, f.comment_id).await;

    let record = f
        .db
        .insert_engagement(
            f.user_id,
            EngagementTarget::Comment,
            f.comment_id,
            EngagementKind::Like,
            true,
        )
        .await
        .expect("insert");

    assert!(record.counter_updated);
    assert_eq!(upvotes(&f.db, f.comment_id).await, before + 1);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_duplicate_engagement_is_rejected_and_not_counted_twice() {
    let f = fixture().await;
    let insert = || {
        f.db.insert_engagement(
            f.user_id,
            EngagementTarget::Comment,
            f.comment_id,
            EngagementKind::Like,
            true,
        )
    };

    insert().await.expect("first insert");
    let after_first = upvotes(&f.db, f.comment_id).await;

    let err = insert().await.unwrap_err();
    assert!(matches!(err, TagPulseError::DuplicateEngagement { .. }));
    assert!(err.to_string().contains("already has like engagement"));
    assert_eq!(upvotes(&f.db, f.comment_id).await, after_first);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_missing_rows_are_not_found() {
    let f = fixture().await;

    let err = f
        .db
        .insert_engagement(
            f.user_id,
            EngagementTarget::Post,
            i64::MAX,
            EngagementKind::Like,
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TagPulseError::PostNotFound(id) if id == i64::MAX));

    let err = f
        .db
        .insert_engagement(
            f.user_id,
            EngagementTarget::Comment,
            i64::MAX,
            EngagementKind::Like,
            true,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TagPulseError::CommentNotFound(_)));

    let err = f
        .db
        .insert_engagement(
            i64::MAX,
            EngagementTarget::Post,
            f.post_id,
            EngagementKind::View,
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TagPulseError::UserNotFound(_)));
    assert!(err.is_not_found());
}

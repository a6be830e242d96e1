//! Row types exchanged with the persistence layer

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A comment on a post. `parent_id == None` marks a root comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentNode {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: Option<i64>,
    pub body: String,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl CommentNode {
    /// Build a comment with an empty body, mainly for analysis inputs and tests
    #[must_use]
    pub fn new(id: i64, parent_id: Option<i64>, upvotes: i64) -> Self {
        Self {
            id,
            post_id: 0,
            parent_id,
            user_id: None,
            body: String::new(),
            upvotes,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// One (post, hashtag) pairing, used to rebuild minute buckets
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostHashtagRow {
    pub post_created_at: DateTime<Utc>,
    pub hashtag_name: String,
}

/// Number of posts carrying a hashtag over some period
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HashtagCount {
    pub hashtag_name: String,
    pub count: i64,
}

/// Number of posts carrying both the target hashtag and `hashtag_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CooccurrenceCount {
    pub hashtag_name: String,
    pub count: i64,
}

/// What an engagement points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTarget {
    Post,
    Comment,
}

impl EngagementTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl std::str::FromStr for EngagementTarget {
    type Err = crate::TagPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            other => Err(crate::TagPulseError::InvalidInput(format!(
                "Invalid target_type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Like,
    Share,
    View,
    Bookmark,
}

impl EngagementKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Share => "share",
            Self::View => "view",
            Self::Bookmark => "bookmark",
        }
    }
}

impl std::str::FromStr for EngagementKind {
    type Err = crate::TagPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "share" => Ok(Self::Share),
            "view" => Ok(Self::View),
            "bookmark" => Ok(Self::Bookmark),
            other => Err(crate::TagPulseError::InvalidInput(format!(
                "Invalid engagement kind: {other}"
            ))),
        }
    }
}

/// A stored engagement, as returned by `Database::insert_engagement`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub engagement_id: i64,
    pub user_id: i64,
    pub target_type: EngagementTarget,
    pub target_id: i64,
    pub kind: EngagementKind,
    pub created_at: DateTime<Utc>,
    /// Whether the liked comment's upvote counter was bumped
    pub counter_updated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_names_parse_back() {
        for target in [EngagementTarget::Post, EngagementTarget::Comment] {
            assert_eq!(target.as_str().parse::<EngagementTarget>().unwrap(), target);
        }
        for kind in [
            EngagementKind::Like,
            EngagementKind::Share,
            EngagementKind::View,
            EngagementKind::Bookmark,
        ] {
            assert_eq!(kind.as_str().parse::<EngagementKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_unknown_engagement_names_are_invalid_input() {
        assert!(matches!(
            "user".parse::<EngagementTarget>(),
            Err(crate::TagPulseError::InvalidInput(msg)) if msg.contains("target_type")
        ));
        assert!(matches!(
            "Like".parse::<EngagementKind>(),
            Err(crate::TagPulseError::InvalidInput(_))
        ));
    }
}

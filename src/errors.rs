use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagPulseError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Post {0} not found")]
    PostNotFound(i64),

    #[error("Comment {0} not found")]
    CommentNotFound(i64),

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("User {user_id} already has {kind} engagement on {target_type} {target_id}")]
    DuplicateEngagement {
        user_id: i64,
        kind: String,
        target_type: String,
        target_id: i64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl TagPulseError {
    /// Whether this error means a referenced post, comment or user does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::UserNotFound(_)
        )
    }
}

impl From<&str> for TagPulseError {
    fn from(msg: &str) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl From<String> for TagPulseError {
    fn from(msg: String) -> Self {
        Self::Custom(msg)
    }
}

impl From<redis::RedisError> for TagPulseError {
    fn from(err: redis::RedisError) -> Self {
        Self::Cache(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TagPulseError>;

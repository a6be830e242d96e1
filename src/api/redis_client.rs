use std::time::Duration;

use redis::AsyncCommands;

use crate::config::RedisConfig;
use crate::TagPulseError;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    namespace: String,
    default_ttl: Duration,
}

impl RedisClient {
    /// Parse the URL; no connection is made until the first command
    ///
    /// # Errors
    /// Returns an error if the URL is invalid
    pub fn connect(config: &RedisConfig) -> crate::Result<Self> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| TagPulseError::Cache(format!("Redis open error: {e}")))?;

        Ok(Self {
            client,
            namespace: config.namespace.clone(),
            default_ttl: Duration::from_secs(config.default_ttl_secs),
        })
    }

    fn key(&self, k: &str) -> String {
        format!("{}{}", self.namespace, k)
    }

    async fn connection(&self) -> crate::Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| TagPulseError::Cache(format!("Redis connect error: {e}")))
    }

    pub async fn get_json(&self, key: &str) -> crate::Result<Option<String>> {
        let k = self.key(key);
        let mut conn = self.connection().await?;
        let val: Option<String> = conn
            .get(k)
            .await
            .map_err(|e| TagPulseError::Cache(format!("Redis GET error: {e}")))?;
        Ok(val)
    }

    pub async fn set_json_with_ttl(
        &self,
        key: &str,
        json: &str,
        ttl: Option<Duration>,
    ) -> crate::Result<()> {
        let k = self.key(key);
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut conn = self.connection().await?;
        // EXPIRE 0 deletes the key at once
        let secs = i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX);
        redis::pipe()
            .set(&k, json)
            .ignore()
            .expire(&k, secs)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| TagPulseError::Cache(format!("Redis SET/EXPIRE error: {e}")))?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> crate::Result<()> {
        let k = self.key(key);
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(k)
            .await
            .map_err(|e| TagPulseError::Cache(format!("Redis DEL error: {e}")))?;
        Ok(())
    }

    /// Delete every key under the namespace that matches `pattern`
    ///
    /// Walks the keyspace with SCAN rather than KEYS so a large database is
    /// not blocked. Returns the number of keys deleted.
    pub async fn delete_matching(&self, pattern: &str) -> crate::Result<usize> {
        let pattern = self.key(pattern);
        let mut conn = self.connection().await?;
        let mut cursor: u64 = 0;
        let mut deleted = 0;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| TagPulseError::Cache(format!("Redis SCAN error: {e}")))?;
            if !keys.is_empty() {
                let removed: usize = conn
                    .del(&keys)
                    .await
                    .map_err(|e| TagPulseError::Cache(format!("Redis DEL error: {e}")))?;
                deleted += removed;
            }
            if next == 0 {
                return Ok(deleted);
            }
            cursor = next;
        }
    }

    pub async fn ping(&self) -> crate::Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| TagPulseError::Cache(format!("Redis PING error: {e}")))?;
        Ok(())
    }
}

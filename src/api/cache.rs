//! Redis-backed trending snapshot cache
//!
//! Snapshots are stored as JSON under the client's namespace. Expiry is left
//! to Redis TTLs; explicit deletes come from the engine after each sync,
//! and the first sync clears the whole `trending:*` space.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::redis_client::RedisClient;
use crate::trending::cache::SNAPSHOT_KEY_PATTERN;
use crate::trending::TrendingCache;
use crate::trending::TrendingSnapshot;

pub struct RedisTrendingCache {
    redis: Arc<RedisClient>,
}

impl RedisTrendingCache {
    #[must_use]
    pub const fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl TrendingCache for RedisTrendingCache {
    async fn get(&self, key: &str) -> crate::Result<Option<TrendingSnapshot>> {
        let Some(data) = self.redis.get_json(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<TrendingSnapshot>(&data) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                // Written by an incompatible version; treat as a miss
                debug!("Discarding unreadable trending snapshot {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        snapshot: &TrendingSnapshot,
        ttl: Duration,
    ) -> crate::Result<()> {
        let json_data = serde_json::to_string(snapshot)?;
        self.redis
            .set_json_with_ttl(key, &json_data, Some(ttl))
            .await?;
        debug!("Cached trending snapshot {} for {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> crate::Result<()> {
        self.redis.delete(key).await
    }

    async fn clear(&self) -> crate::Result<usize> {
        self.redis.delete_matching(SNAPSHOT_KEY_PATTERN).await
    }
}

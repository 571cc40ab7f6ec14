//! Redis-backed memoization store.
//!
//! The store is an optional capability: resolution happens once at
//! startup, and a connection failure degrades the service to uncached
//! mode rather than failing it. Consumers hold `Option<Arc<dyn
//! CacheStore>>` and branch explicitly, which keeps the orchestrator's
//! fallback paths testable with injected implementations.

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::RedisConfig;

/// A get/set-with-TTL failed against the store.
///
/// Never surfaced to clients: a failed GET falls back to direct
/// computation, a failed SETEX is logged and dropped.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection unavailable: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("cache command failed: {0}")]
    Command(#[from] redis::RedisError),
}

/// Key-value capability required by the orchestrator.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a stored value. `Ok(None)` is a miss; `Err` is a
    /// transport problem and the store should be treated as unhealthy
    /// for the rest of the request.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value with a TTL in seconds.
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;
}

/// Production store backed by a deadpool-redis pool.
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }
}

/// Resolve the cache capability from configuration.
///
/// Builds a pool and verifies the connection with a PING. Any failure
/// along the way logs a warning and returns `None` so the server comes
/// up uncached; the cache being down must never be fatal.
pub async fn connect_cache(config: &RedisConfig) -> Option<Arc<dyn CacheStore>> {
    if !config.enabled {
        tracing::info!("cache disabled by configuration, computing everything directly");
        return None;
    }

    tracing::info!(url = %config.url, "connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    // `from_url` leaves the pool field unset; assigning it outright is
    // the only way the configured size and timeouts take effect.
    redis_config.pool = Some(pool_settings(config));

    let pool = match redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1)) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "failed to create Redis pool, continuing without cache");
            return None;
        }
    };

    match ping(&pool).await {
        Ok(()) => {
            tracing::info!("Redis connected successfully");
            Some(Arc::new(RedisCache::new(pool)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis connection failed, continuing without cache");
            None
        }
    }
}

/// Map the service-level Redis settings onto deadpool's pool knobs.
fn pool_settings(config: &RedisConfig) -> deadpool_redis::PoolConfig {
    let timeout = Duration::from_millis(config.timeout_ms);
    let mut pool = deadpool_redis::PoolConfig::new(config.pool_size);
    pool.timeouts.wait = Some(timeout);
    pool.timeouts.create = Some(timeout);
    pool.timeouts.recycle = Some(timeout);
    pool
}

async fn ping(pool: &Pool) -> Result<(), CacheError> {
    let mut conn = pool.get().await?;
    redis::cmd("PING").query_async::<()>(&mut conn).await?;
    Ok(())
}

// ============================================================================
// Catalog Infrastructure - Redis Cache
// File: crates/catalog-infrastructure/src/cache/redis_cache.rs
// ============================================================================
//! `CacheClient` over a deadpool-managed Redis connection pool. Patterns are
//! expanded with a cursor `SCAN` so a purge never blocks the server like
//! `KEYS` would.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::cmd;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use tracing::debug;

use catalog_core::cache::{CacheClient, CacheError, CacheKey};

const SCAN_BATCH: usize = 100;

pub fn create_redis_pool(url: &str, max_connections: usize) -> Result<Pool, CacheError> {
    let mut config = Config::from_url(url);
    config.pool = Some(PoolConfig::new(max_connections));
    config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CacheError::Backend(format!("Failed to create Redis pool: {}", e)))
}

#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to get Redis connection: {}", e)))
    }

    async fn scan(&self, conn: &mut Connection, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        let mut cursor = 0u64;

        loop {
            let (next, batch): (u64, Vec<String>) = cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(conn)
                .await
                .map_err(|e| CacheError::Backend(format!("Failed to scan keys: {}", e)))?;

            keys.extend(batch);
            cursor = next;

            if cursor == 0 {
                break;
            }
        }

        Ok(keys)
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;

        cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to get {}: {}", key, e)))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let _: () = cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to set {}: {}", key, e)))?;
        Ok(())
    }

    async fn delete(&self, keys: &[CacheKey]) -> Result<u64, CacheError> {
        let mut conn = self.connection().await?;

        let mut targets = Vec::new();
        for key in keys {
            match key {
                CacheKey::Exact(k) => targets.push(k.clone()),
                CacheKey::Pattern(p) => targets.extend(self.scan(&mut conn, p).await?),
            }
        }

        if targets.is_empty() {
            return Ok(0);
        }

        let removed: u64 = cmd("DEL")
            .arg(&targets)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to delete keys: {}", e)))?;

        debug!("Removed {} of {} cache keys", removed, targets.len());
        Ok(removed)
    }
}

//! Read-through caching over any loader. The cache never fails a read: a
//! backend error or an undecodable entry is treated as a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::client::CacheClient;
use crate::error::DomainError;

#[derive(Clone)]
pub struct ReadThrough {
    cache: Arc<dyn CacheClient>,
    ttl: Duration,
}

impl ReadThrough {
    pub fn new(cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Serve `key` from the cache, or run `load` and remember a `Some` result.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, load: F) -> Result<Option<T>, DomainError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, DomainError>>,
    {
        if let Some(hit) = self.lookup::<T>(key).await {
            debug!("Cache hit: {}", key);
            return Ok(Some(hit));
        }

        let loaded = load().await?;
        if let Some(value) = &loaded {
            self.remember(key, value).await;
        }
        Ok(loaded)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for {}, falling back to store: {}", key, e);
                None
            }
        }
    }

    async fn remember<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not encode cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, raw, self.ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

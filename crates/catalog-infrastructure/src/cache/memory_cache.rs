//! In-process `CacheClient` with lazy TTL expiry. Stands in for Redis in
//! single-node setups and tests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use regex::Regex;

use catalog_core::cache::{CacheClient, CacheError, CacheKey};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
pub struct MemoryCache {
    map: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live (unexpired) key count.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.map.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.map.get(key).is_some_and(|e| !e.is_expired(now))
    }
}

/// Translate a Redis glob (`*`, `?`) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex, CacheError> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|_| CacheError::InvalidPattern(pattern.to_string()))
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let Some(entry) = self.map.get(key) else {
            return Ok(None);
        };
        if entry.is_expired(Instant::now()) {
            drop(entry);
            self.map.remove(key);
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.map.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[CacheKey]) -> Result<u64, CacheError> {
        let mut removed = 0u64;

        for key in keys {
            match key {
                CacheKey::Exact(k) => {
                    if self.map.remove(k).is_some() {
                        removed += 1;
                    }
                }
                CacheKey::Pattern(p) => {
                    let re = glob_to_regex(p)?;
                    self.map.retain(|k, _| {
                        let matched = re.is_match(k);
                        if matched {
                            removed += 1;
                        }
                        !matched
                    });
                }
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let cache = MemoryCache::new();
        cache.set("menus", "[]".into(), TTL).await.unwrap();

        assert_eq!(cache.get("menus").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("menus", "[]".into(), Duration::ZERO).await.unwrap();

        assert_eq!(cache.get("menus").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_pattern_delete_only_hits_matching_keys() {
        let cache = MemoryCache::new();
        for key in ["dishes:m1:s1", "dishes:m1:s1:d1", "dishes:m1:s2", "dishes:m2:s1", "menus"] {
            cache.set(key, "x".into(), TTL).await.unwrap();
        }

        let removed = cache
            .delete(&[CacheKey::pattern("dishes:m1:s1*"), CacheKey::exact("menus")])
            .await
            .unwrap();

        assert_eq!(removed, 3);
        assert!(cache.contains("dishes:m1:s2"));
        assert!(cache.contains("dishes:m2:s1"));
        assert!(!cache.contains("dishes:m1:s1:d1"));
    }

    #[test]
    fn test_glob_escapes_regex_syntax() {
        let re = glob_to_regex("a.b?c*").unwrap();
        assert!(re.is_match("a.bxc"));
        assert!(re.is_match("a.bxcdef"));
        assert!(!re.is_match("aXbxc"));
    }
}

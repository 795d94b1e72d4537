//! Cache adapters (Redis and in-process)

pub mod redis_cache;
pub mod memory_cache;

pub use redis_cache::{create_redis_pool, RedisCache};
pub use memory_cache::MemoryCache;

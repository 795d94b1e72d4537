//! Cache port, key layout, invalidation policy and read-through helper.

pub mod client;
pub mod keys;
pub mod invalidation;
pub mod read_through;

pub use client::{CacheClient, CacheError, CacheKey};
pub use invalidation::{CacheInvalidator, Invalidation, Mutation, Target};
pub use read_through::ReadThrough;

#[cfg(test)]
pub use client::MockCacheClient;

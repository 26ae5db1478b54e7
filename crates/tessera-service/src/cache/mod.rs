//! Caching infrastructure for the service layer.
//!
//! Values are stored as JSON strings under `<group>::<key>` keys, which lets
//! a whole group be evicted with a single pattern delete.

mod cache_health;
mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_health::CacheHealthCheck;
pub use cache_interface::{CacheExt, CacheInterface};
#[cfg(test)]
pub use cache_interface::MockCacheInterface;
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::RedisCacheService;

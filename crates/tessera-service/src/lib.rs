//! # Tessera Service
//!
//! User service layer for Tessera: read-through caching of user lookups,
//! group eviction on writes, and update notifications.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod messaging;
pub mod metrics;
pub mod redis_pool;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use messaging::*;
pub use redis_pool::create_redis_pool;
pub use r#impl::{UserServiceImpl, UserServiceImplParameters, UserServiceSettings};
pub use user_service::*;

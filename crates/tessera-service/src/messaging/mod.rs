//! Notification sink for user change events.
//!
//! Messages are plain strings published fire-and-forget; callers log and
//! swallow send failures.

mod memory_message;
mod message_service;
mod redis_message;

pub use memory_message::InMemoryMessageService;
#[cfg(test)]
pub use message_service::MockMessageService;
pub use message_service::{MessageService, USER_UPDATED};
pub use redis_message::RedisMessageService;

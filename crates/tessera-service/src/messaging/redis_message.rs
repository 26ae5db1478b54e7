//! Redis pub/sub notification sink.

use super::MessageService;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use tessera_core::{TesseraError, TesseraResult};
use tracing::debug;

/// Publishes notifications to a Redis channel.
///
/// A default-built component has no pool and drops every message.
#[derive(Clone, Component)]
#[shaku(interface = MessageService)]
pub struct RedisMessageService {
    #[shaku(default)]
    pool: Option<Arc<Pool>>,
    #[shaku(default)]
    channel: String,
}

impl RedisMessageService {
    /// Creates a message service publishing to `channel`.
    #[must_use]
    pub fn new(pool: Arc<Pool>, channel: impl Into<String>) -> Self {
        Self {
            pool: Some(pool),
            channel: channel.into(),
        }
    }

    /// Creates a message service that drops every message.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            channel: String::new(),
        }
    }

    /// Returns the target channel.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl MessageService for RedisMessageService {
    async fn send(&self, message: &str) -> TesseraResult<()> {
        let Some(pool) = &self.pool else {
            debug!("Messaging disabled, dropping message '{}'", message);
            return Ok(());
        };

        let mut conn = pool.get().await.map_err(|e| {
            TesseraError::Messaging(format!("Failed to get Redis connection: {}", e))
        })?;

        let receivers: i64 = conn.publish(&self.channel, message).await.map_err(|e| {
            TesseraError::Messaging(format!(
                "Failed to publish to channel '{}': {}",
                self.channel, e
            ))
        })?;

        debug!(
            "Published '{}' to channel '{}' ({} receivers)",
            message, self.channel, receivers
        );
        Ok(())
    }
}

impl std::fmt::Debug for RedisMessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMessageService")
            .field("enabled", &self.pool.is_some())
            .field("channel", &self.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_drops_messages() {
        let service = RedisMessageService::disabled();
        assert!(service.send("user updated").await.is_ok());
        assert_eq!(service.channel(), "");
    }
}

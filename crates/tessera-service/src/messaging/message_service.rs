//! Message service trait.

use async_trait::async_trait;
use tessera_core::{Interface, TesseraResult};

/// Notification emitted after a user has been updated.
pub const USER_UPDATED: &str = "user updated";

/// Sink for outbound notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageService: Interface + Send + Sync {
    /// Publishes a message.
    async fn send(&self, message: &str) -> TesseraResult<()>;
}

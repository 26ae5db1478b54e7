//! In-process notification sink.

use super::MessageService;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use tessera_core::TesseraResult;
use tracing::debug;

/// Records every message it receives.
#[derive(Debug, Default, Component)]
#[shaku(interface = MessageService)]
pub struct InMemoryMessageService {
    #[shaku(default)]
    messages: Mutex<Vec<String>>,
}

impl InMemoryMessageService {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the messages sent so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl MessageService for InMemoryMessageService {
    async fn send(&self, message: &str) -> TesseraResult<()> {
        debug!("Recording message '{}'", message);
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}

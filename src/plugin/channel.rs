use async_trait::async_trait;

use crate::core::models::{InboundEvent, Reply};

/// Send primitive of the chat channel an event arrived on.
///
/// Implemented by host adapters; the plugin only uses it for the interim
/// acknowledgment, the final reply is returned to the caller.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send(&self, reply: Reply, event: &InboundEvent) -> anyhow::Result<()>;
}

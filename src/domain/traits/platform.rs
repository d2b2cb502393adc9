use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::PlatformError;
use crate::domain::entities::{ChannelRef, OutboundMessage};

/// Platform trait - the outbound primitives a chat platform adapter provides
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Find the text channel a command argument refers to, by id, mention or name.
    /// `Ok(None)` when nothing in the guild matches.
    async fn resolve_channel(&self, argument: &str) -> Result<Option<ChannelRef>, PlatformError>;

    /// Post a message to a channel, returning the new message id
    async fn send(&self, channel: ChannelRef, message: &OutboundMessage) -> Result<u64, PlatformError>;

    /// Delete a message from a channel
    async fn delete_message(&self, channel: ChannelRef, message_id: u64) -> Result<(), PlatformError>;

    /// Post a text message that removes itself after `lifetime`
    async fn send_transient(
        &self,
        channel: ChannelRef,
        text: &str,
        lifetime: Duration,
    ) -> Result<(), PlatformError>;
}

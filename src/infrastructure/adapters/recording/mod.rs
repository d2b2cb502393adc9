//! In-memory adapter that records every outbound call, for tests

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::errors::PlatformError;
use crate::domain::entities::{ChannelRef, OutboundMessage};
use crate::domain::traits::ChatPlatform;

/// One recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Sent { channel: ChannelRef, message: OutboundMessage },
    Deleted { channel: ChannelRef, message_id: u64 },
    Transient { channel: ChannelRef, text: String, lifetime: Duration },
}

/// Recording platform
#[derive(Default)]
pub struct RecordingPlatform {
    /// Text channels of the guild, in listing order
    channels: Vec<(ChannelRef, String)>,
    calls: Mutex<Vec<Recorded>>,
    forbidden: Mutex<HashSet<ChannelRef>>,
    next_id: Mutex<u64>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, id: u64, name: impl Into<String>) -> Self {
        self.channels.push((ChannelRef::new(id), name.into()));
        self
    }

    /// Make sends to `channel` fail as if the bot lacked permissions there
    pub fn forbid(&self, channel: ChannelRef) {
        self.forbidden.lock().unwrap().insert(channel);
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    /// Messages posted to `channel`, in order
    pub fn sent_to(&self, channel: ChannelRef) -> Vec<OutboundMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Recorded::Sent { channel: c, message } if c == channel => Some(message),
                _ => None,
            })
            .collect()
    }

    fn check(&self, channel: ChannelRef) -> Result<(), PlatformError> {
        if self.forbidden.lock().unwrap().contains(&channel) {
            return Err(PlatformError::MissingPermissions(format!(
                "cannot post in {}",
                channel
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn resolve_channel(&self, argument: &str) -> Result<Option<ChannelRef>, PlatformError> {
        Ok(ChannelRef::resolve(
            argument,
            self.channels.iter().map(|(channel, name)| (*channel, name.as_str())),
        ))
    }

    async fn send(&self, channel: ChannelRef, message: &OutboundMessage) -> Result<u64, PlatformError> {
        self.check(channel)?;
        self.calls.lock().unwrap().push(Recorded::Sent {
            channel,
            message: message.clone(),
        });
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(*next_id)
    }

    async fn delete_message(&self, channel: ChannelRef, message_id: u64) -> Result<(), PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push(Recorded::Deleted { channel, message_id });
        Ok(())
    }

    async fn send_transient(
        &self,
        channel: ChannelRef,
        text: &str,
        lifetime: Duration,
    ) -> Result<(), PlatformError> {
        self.check(channel)?;
        self.calls.lock().unwrap().push(Recorded::Transient {
            channel,
            text: text.to_string(),
            lifetime,
        });
        Ok(())
    }
}

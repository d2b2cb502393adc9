use super::{ChannelRef, User};

/// Message content after prefix parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    Empty,
}

/// An inbound guild message, as handed over by a platform adapter
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub channel: ChannelRef,
    pub sender: User,
    /// Role names the sender holds in the guild the message was posted in
    pub roles: Vec<String>,
    pub text: String,
}

impl Message {
    pub fn new(id: u64, channel: ChannelRef, sender: User, text: impl Into<String>) -> Self {
        Self {
            id,
            channel,
            sender,
            roles: Vec::new(),
            text: text.into(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }
}

use super::{ChannelRef, Message, User};

/// One command event, alive for the duration of its handling
#[derive(Debug, Clone)]
pub struct Invocation {
    pub message_id: u64,
    pub command: String,
    pub invoker: User,
    pub roles: Vec<String>,
    pub channel: ChannelRef,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn from_message(message: &Message, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            message_id: message.id,
            command: command.into(),
            invoker: message.sender.clone(),
            roles: message.roles.clone(),
            channel: message.channel,
            args,
        }
    }

    /// First argument, naming an explicit target channel when given
    pub fn target_argument(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

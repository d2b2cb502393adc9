use std::collections::BTreeMap;

use super::{AuthorizationList, Invocation, OutboundMessage};
use crate::application::errors::CommandError;

/// Command handler function type: builds the messages to post, in order
pub type CommandHandler =
    Box<dyn Fn(&Invocation) -> Result<Vec<OutboundMessage>, CommandError> + Send + Sync>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    /// Shown in the confirmation posted when output is redirected to another channel
    pub label: String,
    /// Whether the first argument may name a different target channel
    pub accepts_target: bool,
    /// Roles allowed to run the command; `None` means anyone may
    pub required_roles: Option<AuthorizationList>,
    pub handler: Option<CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = capitalize(&name);
        Self {
            name,
            description: None,
            usage: None,
            label,
            accepts_target: false,
            required_roles: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_target_channel(mut self) -> Self {
        self.accepts_target = true;
        self
    }

    pub fn with_required_roles(mut self, roles: AuthorizationList) -> Self {
        self.required_roles = Some(roles);
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Invocation) -> Result<Vec<OutboundMessage>, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Command registry for managing available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands in name order
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

//! Message parser - Splits prefixed text into command name and arguments

use crate::domain::entities::Content;

/// Parses incoming message text into structured content
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse message text
    pub fn parse(&self, text: &str) -> Content {
        if text.trim().is_empty() {
            return Content::Empty;
        }

        match text.strip_prefix(self.command_prefix.as_str()) {
            Some(rest) => self.parse_command(text, rest),
            None => Content::Text(text.to_string()),
        }
    }

    /// The name must follow the prefix directly: `! signup` is not a command
    fn parse_command(&self, text: &str, rest: &str) -> Content {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Content::Text(text.to_string());
        }

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let args = parts.map(str::to_string).collect();

        Content::Command { name, args }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }
}

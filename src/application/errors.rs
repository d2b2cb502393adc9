//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// The invoker holds none of the roles the command requires
    #[error("{user} is missing at least one of the required roles: {}", .required.join(", "))]
    MissingAnyRole { user: String, required: Vec<String> },

    /// The platform refused the bot an action it needs
    #[error("Bot is missing permissions: {0}")]
    BotMissingPermissions(String),

    /// The channel argument names no text channel in the guild
    #[error("Channel \"{0}\" not found.")]
    ChannelNotFound(String),

    /// A file the command uploads could not be read
    #[error("Failed to read {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Platform(PlatformError),
}

impl From<PlatformError> for CommandError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::MissingPermissions(detail) => CommandError::BotMissingPermissions(detail),
            other => CommandError::Platform(other),
        }
    }
}

/// Errors raised by a chat platform adapter
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Missing permissions: {0}")]
    MissingPermissions(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

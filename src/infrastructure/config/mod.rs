//! Configuration management

use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::domain::entities::{AttachmentSource, AuthorizationList};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_PREFIX: &str = "!";

/// Roles allowed to run the announcement commands
pub const ADMIN_ROLES: [&str; 4] = ["Discord Programmer", "Executive", "Committee", "Admin"];

pub const LOGO_PATH: &str = "assets/DDSC_logo.jpg";
pub const LOGO_FILENAME: &str = "DDSC_logo.jpg";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub health: HealthConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub prefix: String,
    pub admin_roles: AuthorizationList,
}

#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig").field("token", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub logo_path: PathBuf,
    pub logo_filename: String,
}

impl AssetConfig {
    pub fn logo(&self) -> AttachmentSource {
        AttachmentSource::new(&self.logo_path, &self.logo_filename)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            admin_roles: AuthorizationList::new(ADMIN_ROLES),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            logo_path: PathBuf::from(LOGO_PATH),
            logo_filename: LOGO_FILENAME.to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `DISCORD_TOKEN` is required, `PORT` optional
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("DISCORD_TOKEN".to_string()))?;

        let mut health = HealthConfig::default();
        if let Some(port) = lookup("PORT") {
            health.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a port number, got {:?}", port)))?;
        }

        Ok(Self {
            bot: BotConfig::default(),
            discord: DiscordConfig { token },
            health,
            assets: AssetConfig::default(),
        })
    }
}

//! Discord adapter
//!
//! Bridges serenity's gateway events into the command dispatcher and
//! implements the outbound platform primitives over serenity's HTTP client.

use async_trait::async_trait;
use serenity::all::{
    ChannelId, ChannelType, Client, Colour, Context, CreateAttachment, CreateEmbed, CreateMessage,
    EventHandler, GatewayIntents, GuildChannel, GuildId, Message as DiscordMessage, MessageId,
    Ready, RoleId, User as DiscordUser,
};
use serenity::cache::Cache;
use serenity::http::{Http, HttpError};
use serenity::model::ModelError;
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::{BotError, PlatformError};
use crate::application::messaging::{CommandDispatcher, DispatchOutcome};
use crate::domain::entities::{ChannelRef, Embed, Message, OutboundMessage, User};
use crate::domain::traits::ChatPlatform;
use crate::infrastructure::config::DiscordConfig;

/// Discord's JSON error code for "Missing Permissions"
const MISSING_PERMISSIONS_CODE: isize = 50013;

/// Outbound side of the adapter, scoped to the guild a command came from
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
    guild_id: GuildId,
}

impl DiscordPlatform {
    pub fn new(ctx: &Context, guild_id: GuildId) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
            guild_id,
        }
    }

    fn build_message(message: &OutboundMessage) -> CreateMessage {
        let mut builder = CreateMessage::new();
        if let Some(content) = &message.content {
            builder = builder.content(content);
        }
        if let Some(embed) = &message.embed {
            builder = builder.embed(build_embed(embed));
        }
        if let Some(attachment) = &message.attachment {
            builder = builder.add_file(CreateAttachment::bytes(
                attachment.data.clone(),
                attachment.filename.clone(),
            ));
        }
        builder
    }
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .colour(Colour::new(embed.color));
    if let Some(thumbnail) = &embed.thumbnail {
        builder = builder.thumbnail(thumbnail.url());
    }
    builder
}

/// Text and announcement channels in sidebar order
fn text_channels<'a>(channels: impl Iterator<Item = &'a GuildChannel>) -> Vec<(ChannelRef, String)> {
    let mut text: Vec<&GuildChannel> = channels
        .filter(|channel| matches!(channel.kind, ChannelType::Text | ChannelType::News))
        .collect();
    text.sort_by_key(|channel| (channel.position, channel.id));
    text.into_iter()
        .map(|channel| (ChannelRef::new(channel.id.get()), channel.name.clone()))
        .collect()
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn resolve_channel(&self, argument: &str) -> Result<Option<ChannelRef>, PlatformError> {
        let cached = self
            .cache
            .guild(self.guild_id)
            .map(|guild| text_channels(guild.channels.values()));
        let channels = match cached {
            Some(channels) => channels,
            None => text_channels(self.guild_id.channels(&self.http).await?.values()),
        };

        Ok(ChannelRef::resolve(
            argument,
            channels.iter().map(|(channel, name)| (*channel, name.as_str())),
        ))
    }

    async fn send(&self, channel: ChannelRef, message: &OutboundMessage) -> Result<u64, PlatformError> {
        let sent = ChannelId::new(channel.id)
            .send_message(self.http.as_ref(), Self::build_message(message))
            .await?;
        Ok(sent.id.get())
    }

    async fn delete_message(&self, channel: ChannelRef, message_id: u64) -> Result<(), PlatformError> {
        ChannelId::new(channel.id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;
        Ok(())
    }

    async fn send_transient(
        &self,
        channel: ChannelRef,
        text: &str,
        lifetime: Duration,
    ) -> Result<(), PlatformError> {
        let message_id = self.send(channel, &OutboundMessage::text(text)).await?;

        let http = self.http.clone();
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if let Err(e) = ChannelId::new(channel.id)
                .delete_message(&http, MessageId::new(message_id))
                .await
            {
                tracing::warn!("Failed to remove transient notice {}: {}", message_id, e);
            }
        });

        Ok(())
    }
}

fn is_missing_permissions(status: u16, code: isize) -> bool {
    status == 403 || code == MISSING_PERMISSIONS_CODE
}

impl From<serenity::Error> for PlatformError {
    fn from(error: serenity::Error) -> Self {
        match &error {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
                if is_missing_permissions(response.status_code.as_u16(), response.error.code) =>
            {
                PlatformError::MissingPermissions(response.error.message.clone())
            }
            serenity::Error::Model(ModelError::InvalidPermissions { .. }) => {
                PlatformError::MissingPermissions(error.to_string())
            }
            _ => PlatformError::Request(error.to_string()),
        }
    }
}

/// Discord bot event handler
pub struct Handler {
    dispatcher: Arc<CommandDispatcher>,
}

impl Handler {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("We have logged in as {}", ready.user.name);
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: DiscordMessage) {
        let sender = to_domain_user(&message.author);
        if sender.is_bot {
            return;
        }
        // Commands are guild-only; direct messages carry no roles to check
        let Some(guild_id) = message.guild_id else {
            return;
        };
        if !message.content.starts_with(self.dispatcher.prefix()) {
            return;
        }

        let roles = member_role_names(&ctx, guild_id, &message).await;
        let inbound = Message::new(
            message.id.get(),
            ChannelRef::new(message.channel_id.get()),
            sender,
            message.content.clone(),
        );
        let platform = DiscordPlatform::new(&ctx, guild_id);

        route(&self.dispatcher, &platform, inbound, roles).await;
    }
}

/// Hand a guild message to the dispatcher once the author's roles are known.
/// Returns `None` when the message was skipped or its command failed.
async fn route(
    dispatcher: &CommandDispatcher,
    platform: &dyn ChatPlatform,
    message: Message,
    roles: Result<Vec<String>, PlatformError>,
) -> Option<DispatchOutcome> {
    let inbound = match roles {
        Ok(roles) => message.with_roles(roles),
        Err(e) => {
            tracing::error!(
                "[{}] Skipping message from {}: role lookup failed: {}",
                message.channel.id,
                message.sender,
                e
            );
            return None;
        }
    };

    match dispatcher.dispatch(platform, &inbound).await {
        Ok(outcome) => {
            if !matches!(outcome, DispatchOutcome::Ignored | DispatchOutcome::Completed) {
                tracing::debug!("[{}] Dispatch outcome: {:?}", inbound.channel.id, outcome);
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::error!("[{}] Command failed: {}", inbound.channel.id, e);
            None
        }
    }
}

fn to_domain_user(author: &DiscordUser) -> User {
    let mut user = User::new(author.id.get(), author.name.clone());
    if let Some(global_name) = &author.global_name {
        user = user.with_display_name(global_name.clone());
    }
    user.is_bot = author.bot;
    user
}

/// Resolve the author's role ids to names, from the cache when the guild is cached
async fn member_role_names(
    ctx: &Context,
    guild_id: GuildId,
    message: &DiscordMessage,
) -> Result<Vec<String>, PlatformError> {
    let role_ids: Vec<RoleId> = match &message.member {
        Some(member) => member.roles.clone(),
        None => guild_id.member(ctx, message.author.id).await?.roles,
    };

    let cached: Option<Vec<String>> = ctx.cache.guild(guild_id).map(|guild| {
        role_ids
            .iter()
            .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
            .collect()
    });
    if let Some(names) = cached {
        return Ok(names);
    }

    let roles = guild_id.roles(&ctx.http).await?;
    Ok(role_ids
        .iter()
        .filter_map(|id| roles.get(id).map(|role| role.name.clone()))
        .collect())
}

/// Build the gateway client with the command handler attached
pub async fn build_client(
    config: &DiscordConfig,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<Client, BotError> {
    // MESSAGE_CONTENT is privileged and must be enabled in the Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.token, intents)
        .event_handler(Handler::new(dispatcher))
        .await?;

    Ok(client)
}

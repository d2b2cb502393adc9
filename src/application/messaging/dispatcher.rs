//! Command dispatcher - Routes parsed commands to handlers behind the role guard

use std::time::Duration;

use super::parser::MessageParser;
use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{
    authorize, ChannelRef, Command, CommandRegistry, Content, Invocation, Message, OutboundMessage,
};
use crate::domain::traits::ChatPlatform;

/// How long the missing-role notice stays visible
pub const DENIAL_NOTICE_LIFETIME: Duration = Duration::from_secs(10);

pub const MISSING_PERMISSIONS_NOTICE: &str = "I don't have the required permissions to do that!";

/// What happened to one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command, or not one we know
    Ignored,
    /// Handler ran to completion
    Completed,
    /// Invoker lacked the required role; command message removed, notice posted
    Denied,
    /// Platform refused the bot an action; invoker informed
    BotMissingPermissions,
}

/// Message dispatcher - parses, authorizes and runs commands
pub struct CommandDispatcher {
    parser: MessageParser,
    registry: CommandRegistry,
    denial_notice_lifetime: Duration,
}

impl CommandDispatcher {
    pub fn new(prefix: impl Into<String>, registry: CommandRegistry) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            registry,
            denial_notice_lifetime: DENIAL_NOTICE_LIFETIME,
        }
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Process one inbound message
    pub async fn dispatch(
        &self,
        platform: &dyn ChatPlatform,
        message: &Message,
    ) -> Result<DispatchOutcome, BotError> {
        let Content::Command { name, args } = self.parser.parse(&message.text) else {
            return Ok(DispatchOutcome::Ignored);
        };

        let Some(command) = self.registry.get(&name) else {
            tracing::debug!("[{}] Unknown command: {}{}", message.channel.id, self.parser.prefix(), name);
            return Ok(DispatchOutcome::Ignored);
        };

        let invocation = Invocation::from_message(message, name, args);
        tracing::info!(
            "[{}] {} invoked {}{}",
            invocation.channel.id,
            invocation.invoker,
            self.parser.prefix(),
            invocation.command
        );

        match self.invoke(platform, command, &invocation).await {
            Ok(()) => {
                tracing::debug!("[{}] {} completed", invocation.channel.id, invocation.command);
                Ok(DispatchOutcome::Completed)
            }
            Err(error) => self.on_command_error(platform, &invocation, error).await,
        }
    }

    /// Guard, resolve the target, build the messages, then post them in order
    async fn invoke(
        &self,
        platform: &dyn ChatPlatform,
        command: &Command,
        invocation: &Invocation,
    ) -> Result<(), CommandError> {
        if let Some(required) = &command.required_roles {
            if !authorize(invocation, required) {
                return Err(CommandError::MissingAnyRole {
                    user: invocation.invoker.to_string(),
                    required: required.roles().to_vec(),
                });
            }
        }

        let explicit_target = match invocation.target_argument() {
            Some(argument) if command.accepts_target => Some(
                platform
                    .resolve_channel(argument)
                    .await?
                    .ok_or_else(|| CommandError::ChannelNotFound(argument.to_string()))?,
            ),
            _ => None,
        };

        // Everything the handler needs is gathered before the first send
        let messages = match &command.handler {
            Some(handler) => handler(invocation)?,
            None => {
                tracing::warn!("Command {} has no handler", command.name);
                return Ok(());
            }
        };

        let target = explicit_target.unwrap_or(invocation.channel);
        if let Some(channel) = explicit_target {
            let confirmation = confirmation_text(command, channel);
            platform
                .send(invocation.channel, &OutboundMessage::text(confirmation))
                .await?;
        }

        for message in &messages {
            platform.send(target, message).await?;
        }

        Ok(())
    }

    /// Maps the two handled error kinds to their replies; everything else propagates
    async fn on_command_error(
        &self,
        platform: &dyn ChatPlatform,
        invocation: &Invocation,
        error: CommandError,
    ) -> Result<DispatchOutcome, BotError> {
        match error {
            CommandError::MissingAnyRole { .. } => {
                tracing::warn!("[{}] {}", invocation.channel.id, error);
                platform
                    .delete_message(invocation.channel, invocation.message_id)
                    .await
                    .map_err(CommandError::Platform)?;
                platform
                    .send_transient(
                        invocation.channel,
                        &denial_notice(invocation),
                        self.denial_notice_lifetime,
                    )
                    .await
                    .map_err(CommandError::Platform)?;
                Ok(DispatchOutcome::Denied)
            }
            CommandError::BotMissingPermissions(ref detail) => {
                tracing::warn!("[{}] {} aborted: {}", invocation.channel.id, invocation.command, detail);
                platform
                    .send(invocation.channel, &OutboundMessage::text(MISSING_PERMISSIONS_NOTICE))
                    .await
                    .map_err(CommandError::Platform)?;
                Ok(DispatchOutcome::BotMissingPermissions)
            }
            other => Err(other.into()),
        }
    }
}

pub fn denial_notice(invocation: &Invocation) -> String {
    format!(
        "Hey {}, you don't have the required role!",
        invocation.invoker.mention()
    )
}

fn confirmation_text(command: &Command, target: ChannelRef) -> String {
    format!("{} message sent to {}", command.label, target.mention())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::content::{self, INTRODUCTION_HEADING};
    use crate::application::errors::PlatformError;
    use crate::application::services::CommandService;
    use crate::domain::entities::{AttachmentSource, AuthorizationList, Thumbnail, User};
    use crate::infrastructure::adapters::recording::{Recorded, RecordingPlatform};

    const GENERAL: ChannelRef = ChannelRef { id: 100 };
    const ANNOUNCEMENTS: ChannelRef = ChannelRef { id: 200 };
    const WELCOME: ChannelRef = ChannelRef { id: 815325913234784256 };

    fn logo() -> AttachmentSource {
        AttachmentSource::new(
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DDSC_logo.jpg"),
            "DDSC_logo.jpg",
        )
    }

    fn platform() -> RecordingPlatform {
        RecordingPlatform::new()
            .with_channel(GENERAL.id, "general")
            .with_channel(ANNOUNCEMENTS.id, "announcements")
            .with_channel(WELCOME.id, "welcome")
    }

    fn dispatcher_with_logo(logo: &AttachmentSource) -> CommandDispatcher {
        let roles = AuthorizationList::new(["Discord Programmer", "Executive", "Committee", "Admin"]);
        let mut service = CommandService::new("!");
        service.register_club_commands(&roles, logo);
        service.register_help();
        service.into_dispatcher()
    }

    fn dispatcher() -> CommandDispatcher {
        dispatcher_with_logo(&logo())
    }

    fn message(text: &str, roles: &[&str]) -> Message {
        Message::new(9001, GENERAL, User::new(77, "bob").with_display_name("Bob"), text)
            .with_roles(roles.iter().copied())
    }

    fn sent_count(platform: &RecordingPlatform) -> usize {
        platform
            .calls()
            .iter()
            .filter(|call| matches!(call, Recorded::Sent { .. }))
            .count()
    }

    #[tokio::test]
    async fn test_unauthorized_introduction_is_denied() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!introduction", &["Member"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Denied);
        assert_eq!(
            platform.calls(),
            vec![
                Recorded::Deleted { channel: GENERAL, message_id: 9001 },
                Recorded::Transient {
                    channel: GENERAL,
                    text: "Hey <@77>, you don't have the required role!".to_string(),
                    lifetime: Duration::from_secs(10),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_with_target_sends_nothing_there() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!signup <#200>", &[]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Denied);
        assert!(platform.sent_to(ANNOUNCEMENTS).is_empty());
        assert!(platform.sent_to(GENERAL).is_empty());
    }

    #[tokio::test]
    async fn test_role_check_runs_before_channel_resolution() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!signup no-such-channel", &["Member"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Denied);
    }

    #[tokio::test]
    async fn test_signup_in_current_channel() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!signup", &["Member", "Committee"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(platform.sent_to(GENERAL), content::signup_messages());
        assert_eq!(platform.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_to_other_channel_confirms_first() {
        let platform = platform();
        dispatcher()
            .dispatch(&platform, &message("!signup <#200>", &["Admin"]))
            .await
            .unwrap();

        assert_eq!(
            platform.calls(),
            vec![
                Recorded::Sent {
                    channel: GENERAL,
                    message: OutboundMessage::text("Signup message sent to <#200>"),
                },
                Recorded::Sent {
                    channel: ANNOUNCEMENTS,
                    message: OutboundMessage::text(content::signup_text()),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_target_channel_by_name() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!signup announcements", &["Admin"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(
            platform.sent_to(GENERAL),
            vec![OutboundMessage::text("Signup message sent to <#200>")]
        );
        assert_eq!(platform.sent_to(ANNOUNCEMENTS), content::signup_messages());
    }

    #[tokio::test]
    async fn test_unknown_channel_sends_no_confirmation() {
        let dispatcher = dispatcher();
        for argument in ["<#999999999999999999>", "999999999999999999", "announcments"] {
            let platform = platform();
            let text = format!("!introduction {}", argument);
            let err = dispatcher
                .dispatch(&platform, &message(&text, &["Admin"]))
                .await
                .unwrap_err();

            assert!(
                matches!(err, BotError::Command(CommandError::ChannelNotFound(ref arg)) if arg == argument),
                "{argument}"
            );
            assert!(platform.calls().is_empty(), "{argument}");
        }
    }

    #[tokio::test]
    async fn test_introduction_sends_five_units_in_order() {
        let platform = platform();
        dispatcher()
            .dispatch(&platform, &message("!introduction", &["Executive"]))
            .await
            .unwrap();

        let sent = platform.sent_to(GENERAL);
        assert_eq!(sent.len(), 5);
        assert_eq!(sent[0].content.as_deref(), Some(INTRODUCTION_HEADING));
        assert!(sent[0].embed.is_none());
        assert!(sent[1..].iter().all(|m| m.embed.is_some()));

        let attachment = sent[1].attachment.as_ref().unwrap();
        assert_eq!(
            sent[1].embed.as_ref().unwrap().thumbnail,
            Some(Thumbnail::attachment(attachment.filename.clone()))
        );
    }

    #[tokio::test]
    async fn test_introduction_to_other_channel() {
        let platform = platform();
        dispatcher()
            .dispatch(&platform, &message("!introduction 815325913234784256", &["Admin"]))
            .await
            .unwrap();

        assert_eq!(
            platform.sent_to(GENERAL),
            vec![OutboundMessage::text("Introduction message sent to <#815325913234784256>")]
        );
        assert_eq!(
            platform.sent_to(WELCOME),
            content::introduction_messages(logo().load().unwrap())
        );
    }

    #[tokio::test]
    async fn test_missing_logo_sends_nothing() {
        let platform = platform();
        let missing = AttachmentSource::new("/nonexistent/DDSC_logo.jpg", "DDSC_logo.jpg");
        let err = dispatcher_with_logo(&missing)
            .dispatch(&platform, &message("!introduction <#200>", &["Admin"]))
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::Command(CommandError::Asset { .. })));
        assert_eq!(sent_count(&platform), 0);
    }

    #[tokio::test]
    async fn test_repeated_invocations_send_full_content_each_time() {
        let platform = platform();
        let dispatcher = dispatcher();
        for _ in 0..3 {
            dispatcher
                .dispatch(&platform, &message("!signup", &["Admin"]))
                .await
                .unwrap();
        }

        let sent = platform.sent_to(GENERAL);
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|m| *m == OutboundMessage::text(content::signup_text())));
    }

    #[tokio::test]
    async fn test_missing_bot_permission_is_reported_and_aborts() {
        let platform = platform();
        platform.forbid(ANNOUNCEMENTS);

        let outcome = dispatcher()
            .dispatch(&platform, &message("!introduction <#200>", &["Admin"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::BotMissingPermissions);
        assert_eq!(
            platform.sent_to(GENERAL),
            vec![
                OutboundMessage::text("Introduction message sent to <#200>"),
                OutboundMessage::text(MISSING_PERMISSIONS_NOTICE),
            ]
        );
        assert!(!platform
            .calls()
            .iter()
            .any(|call| matches!(call, Recorded::Deleted { .. })));
    }

    #[tokio::test]
    async fn test_other_platform_errors_propagate() {
        struct Offline;

        #[async_trait::async_trait]
        impl ChatPlatform for Offline {
            async fn resolve_channel(&self, _: &str) -> Result<Option<ChannelRef>, PlatformError> {
                Ok(None)
            }
            async fn send(&self, _: ChannelRef, _: &OutboundMessage) -> Result<u64, PlatformError> {
                Err(PlatformError::Request("connection reset".into()))
            }
            async fn delete_message(&self, _: ChannelRef, _: u64) -> Result<(), PlatformError> {
                Ok(())
            }
            async fn send_transient(&self, _: ChannelRef, _: &str, _: Duration) -> Result<(), PlatformError> {
                Ok(())
            }
        }

        let err = dispatcher()
            .dispatch(&Offline, &message("!signup", &["Admin"]))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Command(CommandError::Platform(PlatformError::Request(_)))));
    }

    #[tokio::test]
    async fn test_plain_text_and_unknown_commands_are_ignored() {
        let platform = platform();
        let dispatcher = dispatcher();

        for text in ["hello there", "!unknown", "!Signup", "! signup"] {
            let outcome = dispatcher.dispatch(&platform, &message(text, &["Admin"])).await.unwrap();
            assert_eq!(outcome, DispatchOutcome::Ignored, "{text}");
        }
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_help_is_open_and_stays_in_channel() {
        let platform = platform();
        let outcome = dispatcher()
            .dispatch(&platform, &message("!help <#200>", &["Member"]))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Completed);
        assert!(platform.sent_to(ANNOUNCEMENTS).is_empty());
        assert_eq!(
            platform.sent_to(GENERAL),
            vec![OutboundMessage::text("No command called \"<#200>\" found.")]
        );
    }
}

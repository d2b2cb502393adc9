//! Domain entities - Core objects of a command invocation

pub mod authorization;
pub mod channel;
pub mod command;
pub mod invocation;
pub mod message;
pub mod outbound;
pub mod user;

pub use authorization::{authorize, AuthorizationList};
pub use channel::ChannelRef;
pub use command::{Command, CommandHandler, CommandRegistry};
pub use invocation::Invocation;
pub use message::{Content, Message};
pub use outbound::{Attachment, AttachmentSource, Embed, OutboundMessage, Thumbnail};
pub use user::User;

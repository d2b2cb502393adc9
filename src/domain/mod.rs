//! Domain layer - Core types of the bot
//! 
//! This layer contains:
//! - Entities: Commands, invocations, inbound and outbound messages
//! - Traits: Abstractions for infrastructure (ChatPlatform)
//! - Rules: Role-based authorization

pub mod entities;
pub mod traits;

//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Content: The static announcements the bot posts
//! - Services: Command registration
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod content;
pub mod errors;
pub mod messaging;
pub mod services;

//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Environment-based configuration
//! - Health: HTTP liveness responder
//! - Adapters: Platform integrations (Discord)

pub mod adapters;
pub mod config;
pub mod health;

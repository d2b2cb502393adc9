//! Chat platform adapters

pub mod discord;

#[cfg(test)]
pub mod recording;

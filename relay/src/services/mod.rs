//! Relay services implementations

pub mod chat_relay;
pub mod provider_client;

#[cfg(test)]
pub mod tests;

pub use chat_relay::*;
pub use provider_client::*;

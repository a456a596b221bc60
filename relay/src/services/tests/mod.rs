//! Tests for relay services
//!
//! Vendor HTTP is served by wiremock; the chat relay runs against a mocked
//! provider client.

pub mod chat_relay;
pub mod provider_client;

//! Webserver library for the SaintVision chat service
//!
//! This library exposes the relay over HTTP: JSON endpoints for the
//! agent-prompt and dual-run chat paths, a routing preview and status.

pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;

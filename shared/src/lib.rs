//! Shared types for the SaintVision relay
//!
//! Holds the request vocabulary (providers, modes, routing hints), the
//! environment-driven relay configuration and the tracing setup used by
//! every binary in the workspace.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::RelayConfig;
pub use errors::*;
pub use types::*;

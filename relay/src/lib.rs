//! Relay library for the SaintVision chat service
//!
//! This library holds the provider routing and prompt augmentation logic,
//! and the HTTP client that forwards finished prompts to the two vendors.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{RelayError, RelayResult};
pub use services::{ChatRelay, RealProviderClient};
pub use traits::*;
pub use types::*;

//! Relay core decision logic
//!
//! Both components are synchronous, pure and safe to call from any number
//! of concurrent requests.

pub mod prompt;
pub mod routing;

pub use prompt::{
    BASE_PROMPT, HISTORY_WINDOW, MODULES, Module, ModeTraits, PromptAugmenter, active_modules,
    build_prompt, compose_with_history, mode_header, mode_traits,
};
pub use routing::{RoutingDecision, RoutingReason, route, select_provider};

//! Domain layer for chatgate
//!
//! This crate contains the conversational core: turns, the bounded session
//! history, the sliding-window rate limiter, input rules and prompt
//! templates. Everything here is synchronous and free of I/O; time is
//! always passed in as an [`std::time::Instant`].
//!
//! # Core Concepts
//!
//! - **Turn**: one message from the user or the assistant
//! - **Admission**: permission from the [`RateLimiter`] to call the provider
//! - **Cooldown**: minimum gap between two accepted identical messages

pub mod admission;
pub mod core;
pub mod input;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use admission::RateLimiter;
pub use core::{
    error::ValidationError,
    model::{GenerationConfig, ModelId},
};
pub use input::{DuplicateGuard, InputPolicy};
pub use prompt::{PromptStyle, PromptTemplate};
pub use session::{
    entities::{Speaker, Turn},
    history::SessionHistory,
};

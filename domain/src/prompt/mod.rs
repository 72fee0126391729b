//! Prompt domain
//!
//! Fixed templates that wrap user input before it reaches the provider.

mod template;

pub use template::{PromptStyle, PromptTemplate};

//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod retry;
pub mod summarize_conversation;
pub mod turn_controller;

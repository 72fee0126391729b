//! Conversation session domain.
//!
//! - [`entities::Turn`]: a single message, tagged with its [`entities::Speaker`]
//! - [`history::SessionHistory`]: bounded, insertion-ordered log of turns

pub mod entities;
pub mod history;

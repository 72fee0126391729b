//! Presentation layer for chatgate
//!
//! This crate contains CLI definitions, the console formatter, the
//! progress spinner and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::ThinkingSpinner;

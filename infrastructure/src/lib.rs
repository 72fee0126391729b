//! Infrastructure layer for chatgate
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP clients for the hosted completion APIs, the
//! JSONL conversation logger and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoadError, ConfigLoader, FileConfig, FileLoggingConfig, FileProvidersConfig,
    FileReplConfig, ProviderKind, ProviderSettings,
};
pub use logging::JsonlConversationLogger;
pub use providers::{ApiGateway, build_gateway};

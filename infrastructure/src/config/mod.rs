//! Configuration file loading for chatgate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHATGATE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./chatgate.toml` or `./.chatgate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/chatgate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGenerationConfig, FileInputConfig, FileLoggingConfig, FileProviderConfig,
    FileProvidersConfig, FileRateLimitConfig, FileReplConfig, FileRetryConfig, FileSessionConfig,
    ProviderKind, ProviderSettings,
};
pub use loader::{ConfigLoadError, ConfigLoader};

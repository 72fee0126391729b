//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["chatgate.toml", ".chatgate.toml"];
const ENV_PREFIX: &str = "CHATGATE_";

/// Keys whose values are kept as raw strings when set from the environment.
const STRING_KEYS: [&str; 18] = [
    "providers.default",
    "providers.summary",
    "providers.gemini.api_key_env",
    "providers.gemini.api_key",
    "providers.gemini.base_url",
    "providers.gemini.model",
    "providers.huggingface.api_key_env",
    "providers.huggingface.api_key",
    "providers.huggingface.base_url",
    "providers.huggingface.model",
    "providers.openai.api_key_env",
    "providers.openai.api_key",
    "providers.openai.base_url",
    "providers.openai.model",
    "generation.model",
    "logging.conversation_log",
    "logging.file",
    "repl.history_file",
];

/// Configuration could not be read or parsed
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CHATGATE_SECTION__KEY`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chatgate.toml` or `./.chatgate.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/chatgate/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigLoadError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!("Loading project config {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigLoadError::NotFound(path.to_path_buf()));
            }
            debug!("Loading config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let env = Env::prefixed(ENV_PREFIX).split("__");
        figment = figment.merge(env.clone());

        // Env values are parsed by type, so `API_KEY=0123` would become a
        // number. String-typed keys are merged again verbatim.
        for (key, value) in env.iter() {
            if STRING_KEYS.contains(&key.as_str()) {
                figment = figment.merge(Serialized::default(key.as_str(), value));
            }
        }

        figment.extract().map_err(|e| ConfigLoadError::Invalid(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/chatgate/config.toml if set,
    /// otherwise falls back to ~/.config/chatgate/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chatgate").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn config_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX));

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(
                "  [     ] Project: ./chatgate.toml or ./.chatgate.toml".to_string(),
            ),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

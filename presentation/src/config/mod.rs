//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show a spinner while waiting for the provider
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            color: true,
        }
    }
}

impl ReplConfig {
    /// Line-editor history location: the configured file (with `~`
    /// expanded) or `<data dir>/chatgate/history.txt`.
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|p| p.join("chatgate").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_file() {
        let config = ReplConfig {
            history_file: Some("/tmp/chatgate-history.txt".to_string()),
            ..ReplConfig::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/chatgate-history.txt"))
        );
    }

    #[test]
    fn test_home_relative_history_file() {
        let config = ReplConfig {
            history_file: Some("~/.chatgate_history".to_string()),
            ..ReplConfig::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.history_path(), Some(home.join(".chatgate_history")));
        }
    }
}

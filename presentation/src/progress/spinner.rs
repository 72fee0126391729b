//! Spinner shown while a provider call is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Steady-tick spinner that clears itself when dropped.
pub struct ThinkingSpinner {
    bar: ProgressBar,
}

impl ThinkingSpinner {
    /// Start a spinner, or a hidden one when progress output is off.
    pub fn start(message: &str, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Drop for ThinkingSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_is_silent() {
        let spinner = ThinkingSpinner::start("Thinking...", false);
        assert!(spinner.bar.is_hidden());
        assert_eq!(spinner.bar.message(), "Thinking...");
    }
}

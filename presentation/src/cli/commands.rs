//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chatgate
#[derive(Parser, Debug)]
#[command(name = "chatgate")]
#[command(author, version, about = "Rate-limited chat sessions with hosted LLMs")]
#[command(long_about = r#"
chatgate keeps a conversation with a hosted language model (Gemini,
Hugging Face Inference or OpenAI) while guarding it: empty, oversized and
rapidly repeated messages are refused, a sliding-window rate limit caps
provider calls, and transient provider outages are retried.

Configuration files are loaded from (in priority order):
1. CHATGATE_* environment variables (e.g. CHATGATE_RATE_LIMIT__MAX_REQUESTS=10)
2. --config <path>     Explicit config file
3. ./chatgate.toml     Project-level config
4. ~/.config/chatgate/config.toml   Global config

Example:
  chatgate
  chatgate --provider huggingface --model HuggingFaceH4/zephyr-7b-beta
  chatgate --provider gemini --summary-provider openai --brief 100
"#)]
pub struct Cli {
    /// Chat provider: gemini, huggingface or openai
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Model identifier (overrides the provider's configured model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Provider used by /end to summarize the conversation
    #[arg(long, value_name = "NAME")]
    pub summary_provider: Option<String>,

    /// Answer briefly: only the latest message is sent, with a word limit
    #[arg(long, value_name = "WORDS")]
    pub brief: Option<u32>,

    /// Write a JSONL transcript of the conversation to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Log filter directive for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_provider_options() {
        let cli = Cli::parse_from([
            "chatgate",
            "--provider",
            "huggingface",
            "--summary-provider",
            "openai",
            "--brief",
            "100",
            "-vv",
        ]);
        assert_eq!(cli.provider.as_deref(), Some("huggingface"));
        assert_eq!(cli.summary_provider.as_deref(), Some("openai"));
        assert_eq!(cli.brief, Some(100));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["chatgate"]);
        assert!(cli.provider.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.log_level(), "warn");
    }
}

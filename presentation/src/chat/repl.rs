//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ReplConfig;
use crate::progress::spinner::ThinkingSpinner;
use chatgate_application::{SummarizeConversationUseCase, TurnController};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::debug;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    New,
    End,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a slash command; `None` for an ordinary chat message.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        Some(match line {
            "/new" | "/reset" => ReplCommand::New,
            "/end" => ReplCommand::End,
            "/history" => ReplCommand::History,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<TurnController>,
    summarizer: Option<SummarizeConversationUseCase>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<TurnController>) -> Self {
        Self {
            controller,
            summarizer: None,
            config: ReplConfig::default(),
        }
    }

    /// Enable `/end` summaries
    pub fn with_summarizer(mut self, summarizer: SummarizeConversationUseCase) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        if !self.config.color {
            colored::control::set_override(false);
        }

        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = self.config.history_path();

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let model = self.controller.config().generation.model;
        println!(
            "{}",
            ConsoleFormatter::welcome(self.controller.provider_name(), model.as_str())
        );

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(&line) {
                        if command == ReplCommand::Quit {
                            println!("Bye!");
                            break;
                        }
                        println!("{}", self.run_command(&command).await);
                        continue;
                    }

                    let _ = rl.add_history_entry(line.as_str());
                    println!("{}", self.send(&line).await);
                    println!();
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Submit one chat message and render the result.
    pub async fn send(&self, line: &str) -> String {
        let spinner = ThinkingSpinner::start("Thinking...", self.config.show_progress);
        let result = self.controller.submit(line).await;
        drop(spinner);

        match result {
            Ok(outcome) => ConsoleFormatter::outcome(&outcome),
            Err(e) => {
                debug!("Submission refused: {}", e);
                ConsoleFormatter::rejection(&e)
            }
        }
    }

    /// Run a slash command (other than `/quit`) and render its output.
    pub async fn run_command(&self, command: &ReplCommand) -> String {
        match command {
            ReplCommand::New => {
                self.controller.reset();
                ConsoleFormatter::notice("Started a new chat.")
            }
            ReplCommand::End => self.end_chat().await,
            ReplCommand::History => ConsoleFormatter::history(&self.controller.history()),
            ReplCommand::Help => ConsoleFormatter::help(),
            ReplCommand::Quit => String::new(),
            ReplCommand::Unknown(cmd) => format!(
                "Unknown command: {}\nType /help for available commands",
                cmd
            ),
        }
    }

    /// Summarize the conversation, then start over.
    async fn end_chat(&self) -> String {
        let Some(summarizer) = &self.summarizer else {
            return ConsoleFormatter::notice("Summaries are not available (no summary provider).");
        };

        let spinner = ThinkingSpinner::start(
            "Generating conversation summary...",
            self.config.show_progress,
        );
        let result = summarizer.execute(&self.controller.history()).await;
        drop(spinner);

        match result {
            Ok(summary) => {
                self.controller.reset();
                format!(
                    "{}\n{}",
                    ConsoleFormatter::summary(&summary),
                    ConsoleFormatter::notice("Chat ended. Started a new chat.")
                )
            }
            Err(e) => ConsoleFormatter::summary_error(&e),
        }
    }
}

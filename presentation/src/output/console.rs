//! Console output formatter for chat turns and notices

use chatgate_application::{SubmitError, SummarizeError, TurnOutcome};
use chatgate_domain::{Speaker, Turn};
use colored::Colorize;

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner shown when the REPL starts
    pub fn welcome(provider: &str, model: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!("{}\n", "chatgate".cyan().bold()));
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Provider:".cyan().bold(),
            provider,
            model
        ));
        output.push_str(&Self::help());
        output
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str("Commands:\n");
        output.push_str("  /new       - Start a new chat\n");
        output.push_str("  /end       - End the chat with a summary and sentiment analysis\n");
        output.push_str("  /history   - Show the conversation so far\n");
        output.push_str("  /help      - Show this help\n");
        output.push_str("  /quit      - Exit\n");
        output
    }

    /// One turn as it appears in the transcript
    pub fn turn(turn: &Turn) -> String {
        match turn.speaker() {
            Speaker::User => format!("{} {}", "You:".green().bold(), turn.text()),
            Speaker::Assistant if turn.is_error() => {
                format!("{} {}", "AI:".red().bold(), turn.text().red())
            }
            Speaker::Assistant => format!("{} {}", "AI:".blue().bold(), turn.text()),
        }
    }

    /// The whole transcript, oldest first
    pub fn history(turns: &[Turn]) -> String {
        if turns.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }
        let mut output = String::new();
        for turn in turns {
            output.push_str(&Self::turn(turn));
            output.push('\n');
        }
        output
    }

    /// The assistant's side of a completed turn
    pub fn outcome(outcome: &TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Replied(text) => format!("{} {}", "AI:".blue().bold(), text),
            TurnOutcome::Failed { message, .. } => {
                format!("{} {}", "AI:".red().bold(), message.red())
            }
        }
    }

    /// A refused submission; nothing was sent
    pub fn rejection(error: &SubmitError) -> String {
        let text = match error {
            SubmitError::AdmissionRejected {
                retry_after: Some(wait),
            } => format!("{} (try again in {}s)", error, wait.as_secs().max(1)),
            _ => error.to_string(),
        };
        format!("{} {}", "!".yellow().bold(), text.yellow())
    }

    pub fn summary(text: &str) -> String {
        format!(
            "\n{}\n\n{}\n",
            "=== Conversation Summary and Analysis ===".cyan().bold(),
            text.trim()
        )
    }

    pub fn summary_error(error: &SummarizeError) -> String {
        match error {
            SummarizeError::EmptyConversation => {
                format!("{} {}", "!".yellow().bold(), error.to_string().yellow())
            }
            SummarizeError::Provider(e) => {
                format!("{} {}", "x".red().bold(), e.user_message().red())
            }
        }
    }

    pub fn notice(text: &str) -> String {
        format!("{} {}", "->".cyan(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_application::ProviderError;
    use chatgate_domain::ValidationError;
    use std::time::{Duration, Instant};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_turns() {
        plain();
        let now = Instant::now();
        let turns = vec![
            Turn::user("Hello", now),
            Turn::assistant("Hi there", now),
            Turn::assistant_error("Service unavailable", now),
        ];

        assert_eq!(
            ConsoleFormatter::history(&turns),
            "You: Hello\nAI: Hi there\nAI: Service unavailable\n"
        );
        assert_eq!(ConsoleFormatter::history(&[]), "(no messages yet)\n");
    }

    #[test]
    fn test_outcome() {
        plain();
        assert_eq!(
            ConsoleFormatter::outcome(&TurnOutcome::Replied("4".to_string())),
            "AI: 4"
        );
        let failed = TurnOutcome::Failed {
            message: "I apologize, but I cannot process that request.".to_string(),
            error: ProviderError::ContentPolicyRejected("SAFETY".to_string()),
        };
        assert_eq!(
            ConsoleFormatter::outcome(&failed),
            "AI: I apologize, but I cannot process that request."
        );
    }

    #[test]
    fn test_rejections() {
        plain();
        assert_eq!(
            ConsoleFormatter::rejection(&SubmitError::Invalid(ValidationError::Empty)),
            "! Message cannot be empty"
        );
        assert_eq!(
            ConsoleFormatter::rejection(&SubmitError::AdmissionRejected {
                retry_after: Some(Duration::from_secs(40)),
            }),
            "! Too many messages, please slow down (try again in 40s)"
        );
        assert_eq!(
            ConsoleFormatter::rejection(&SubmitError::Busy),
            "! Still processing your previous message, please wait"
        );
    }

    #[test]
    fn test_summary_error() {
        plain();
        assert_eq!(
            ConsoleFormatter::summary_error(&SummarizeError::EmptyConversation),
            "! You haven't had any conversation yet"
        );
        let err = SummarizeError::Provider(ProviderError::RateLimitedByProvider);
        assert!(ConsoleFormatter::summary_error(&err).starts_with("x "));
    }
}

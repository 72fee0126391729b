//! Prompt templates for chat turns and conversation summaries

use crate::session::entities::{Speaker, Turn};
use serde::{Deserialize, Serialize};

/// How a chat turn is wrapped before it is sent to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "style")]
pub enum PromptStyle {
    /// Assistant preamble plus the running transcript
    #[default]
    Conversational,
    /// Only the latest message, with a word limit on the answer
    Brief { max_words: u32 },
}

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Preamble for conversational prompts
    pub fn conversational_system() -> &'static str {
        "You are a helpful, friendly AI assistant."
    }

    /// Render a chat prompt for `input`, given the turns that precede it.
    ///
    /// Synthetic error turns are left out of the transcript.
    pub fn render(style: PromptStyle, history: &[Turn], input: &str) -> String {
        match style {
            PromptStyle::Conversational => Self::conversational(history, input),
            PromptStyle::Brief { max_words } => Self::brief(input, max_words),
        }
    }

    pub fn conversational(history: &[Turn], input: &str) -> String {
        let mut prompt = format!(
            "{}\n\nCurrent conversation:\n",
            Self::conversational_system()
        );

        for turn in history.iter().filter(|t| !t.is_error()) {
            let label = match turn.speaker() {
                Speaker::User => "Human",
                Speaker::Assistant => "AI Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", label, turn.text()));
        }

        prompt.push_str(&format!("Human: {}\nAI Assistant:", input));
        prompt
    }

    pub fn brief(input: &str, max_words: u32) -> String {
        format!(
            "User query: {}\n\nImportant: Your response must be strictly less than {} words.",
            input, max_words
        )
    }

    /// Plain `User:` / `Assistant:` transcript, one line per turn.
    pub fn transcript(turns: &[Turn]) -> String {
        turns
            .iter()
            .filter(|t| !t.is_error())
            .map(|t| {
                let label = match t.speaker() {
                    Speaker::User => "User",
                    Speaker::Assistant => "Assistant",
                };
                format!("{}: {}", label, t.text())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt asking for a short summary and a sentiment analysis of a conversation
    pub fn summary(turns: &[Turn]) -> String {
        format!(
            r#"You are an expert at summarizing conversations and at sentiment analysis. Below is a conversation between a user and an AI assistant:

{}

1. Please summarize this conversation in under 150 words.
2. Perform a sentiment analysis of the conversation, describing the overall tone and emotions expressed.

Format your response as:

SUMMARY:
[your summary here]

SENTIMENT ANALYSIS:
[your sentiment analysis here]"#,
            Self::transcript(turns)
        )
    }
}

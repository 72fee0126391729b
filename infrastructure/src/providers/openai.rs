//! OpenAI chat completions client.

use super::http::{non_empty, send_json};
use async_trait::async_trait;
use chatgate_application::{CompletionProvider, ProviderError};
use chatgate_domain::GenerationConfig;
use serde_json::{Value, json};
use tracing::debug;

/// OpenAI API client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }

    pub(crate) fn build_request_body(prompt: &str, config: &GenerationConfig) -> Value {
        json!({
            "model": config.model.as_str(),
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": config.temperature,
            "max_tokens": config.max_output_tokens,
        })
    }

    pub(crate) fn parse_response(json: &Value) -> Result<String, ProviderError> {
        let choice = json["choices"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| ProviderError::Unknown("no choices in response".to_string()))?;

        if choice["finish_reason"].as_str() == Some("content_filter") {
            return Err(ProviderError::ContentPolicyRejected(
                "response filtered".to_string(),
            ));
        }

        non_empty(choice["message"]["content"].as_str().unwrap_or_default())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        debug!(model = %config.model, "OpenAI API request");

        let request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&Self::build_request_body(prompt, config));

        let json = send_json(self.name(), request).await?;
        Self::parse_response(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let config = GenerationConfig::default()
            .with_model("gpt-3.5-turbo")
            .with_temperature(0.0);
        let body = OpenAiClient::build_request_body("Summarize", &config);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Summarize");
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn test_parse_first_choice() {
        let json = json!({
            "choices": [{
                "message": { "role": "assistant", "content": "SUMMARY:\nShort chat." },
                "finish_reason": "stop"
            }]
        });
        assert_eq!(OpenAiClient::parse_response(&json).unwrap(), "SUMMARY:\nShort chat.");
    }

    #[test]
    fn test_content_filter() {
        let json = json!({
            "choices": [{ "message": { "content": null }, "finish_reason": "content_filter" }]
        });
        assert!(matches!(
            OpenAiClient::parse_response(&json),
            Err(ProviderError::ContentPolicyRejected(_))
        ));
    }

    #[test]
    fn test_no_choices() {
        assert!(matches!(
            OpenAiClient::parse_response(&json!({ "choices": [] })),
            Err(ProviderError::Unknown(_))
        ));
    }
}

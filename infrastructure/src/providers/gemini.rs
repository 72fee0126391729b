//! Google Gemini `generateContent` client.

use super::http::{non_empty, send_json};
use async_trait::async_trait;
use chatgate_application::{CompletionProvider, ProviderError};
use chatgate_domain::GenerationConfig;
use serde_json::{Value, json};
use tracing::debug;

/// Gemini API client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }

    fn api_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(prompt: &str, config: &GenerationConfig) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": config.temperature,
                "maxOutputTokens": config.max_output_tokens,
            }
        })
    }

    /// Extract the generated text, or the reason there is none.
    pub(crate) fn parse_response(json: &Value) -> Result<String, ProviderError> {
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(ProviderError::ContentPolicyRejected(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let first = json["candidates"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| ProviderError::Unknown("no candidates in response".to_string()))?;

        if let Some(reason @ ("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")) =
            first["finishReason"].as_str()
        {
            return Err(ProviderError::ContentPolicyRejected(format!(
                "response blocked: {}",
                reason
            )));
        }

        let text: String = first["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        non_empty(&text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        debug!(model = %config.model, "Gemini API request");

        let request = self
            .http
            .post(self.api_url(config.model.as_str()))
            .header("x-goog-api-key", &self.api_key)
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
        let config = GenerationConfig::default().with_max_output_tokens(100);
        let body = GeminiClient::build_request_body("Hello", &config);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
    }

    #[test]
    fn test_joins_text_parts() {
        let json = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "there!\n" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(GeminiClient::parse_response(&json).unwrap(), "Hello, there!");
    }

    #[test]
    fn test_blocked_prompt() {
        let json = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            GeminiClient::parse_response(&json),
            Err(ProviderError::ContentPolicyRejected(_))
        ));
    }

    #[test]
    fn test_safety_finish_reason() {
        let json = json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        });
        assert!(matches!(
            GeminiClient::parse_response(&json),
            Err(ProviderError::ContentPolicyRejected(_))
        ));
    }

    #[test]
    fn test_missing_or_empty_candidates() {
        assert!(matches!(
            GeminiClient::parse_response(&json!({})),
            Err(ProviderError::Unknown(_))
        ));

        let json = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert_eq!(
            GeminiClient::parse_response(&json),
            Err(ProviderError::Unknown("empty response".to_string()))
        );
    }
}

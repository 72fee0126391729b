//! Hugging Face Inference API client.
//!
//! Text-generation endpoints answer in several shapes depending on the
//! model and deployment; all of them are normalised to plain text here.

use super::http::{non_empty, send_json};
use async_trait::async_trait;
use chatgate_application::{CompletionProvider, ProviderError};
use chatgate_domain::GenerationConfig;
use serde_json::{Value, json};
use tracing::debug;

/// Hugging Face Inference API client.
pub struct HuggingFaceClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl HuggingFaceClient {
    pub fn new(http: reqwest::Client, token: String, base_url: String) -> Self {
        Self {
            http,
            token,
            base_url,
        }
    }

    pub(crate) fn build_request_body(prompt: &str, config: &GenerationConfig) -> Value {
        let mut parameters = json!({
            "max_new_tokens": config.max_output_tokens,
            "return_full_text": false,
        });
        // The API rejects a zero temperature; greedy decoding is the equivalent.
        if config.temperature > 0.0 {
            parameters["temperature"] = json!(config.temperature);
        } else {
            parameters["do_sample"] = json!(false);
        }

        json!({
            "inputs": prompt,
            "parameters": parameters,
        })
    }

    /// Normalise a list, object or bare-string response and strip an
    /// echoed prompt.
    pub(crate) fn parse_response(json: &Value, prompt: &str) -> Result<String, ProviderError> {
        if let Some(error) = json["error"].as_str() {
            return Err(if error.contains("is currently loading") {
                ProviderError::Unavailable(error.to_string())
            } else {
                ProviderError::Unknown(error.to_string())
            });
        }

        let item = match json {
            Value::Array(items) => items
                .first()
                .ok_or_else(|| ProviderError::Unknown("empty response".to_string()))?,
            other => other,
        };

        let generated = match item {
            Value::String(text) => text.as_str(),
            Value::Object(_) => item["generated_text"].as_str().ok_or_else(|| {
                ProviderError::Unknown("response has no generated_text".to_string())
            })?,
            _ => {
                return Err(ProviderError::Unknown(format!(
                    "unexpected response shape: {}",
                    item
                )));
            }
        };

        non_empty(generated.strip_prefix(prompt).unwrap_or(generated))
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        debug!(model = %config.model, "Hugging Face inference request");

        let request = self
            .http
            .post(format!("{}/{}", self.base_url, config.model))
            .bearer_auth(&self.token)
            .json(&Self::build_request_body(prompt, config));

        let json = send_json(self.name(), request).await?;
        Self::parse_response(&json, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_with_echoed_prompt() {
        let generated = "Tell me a joke. Why did the chicken cross the road?";
        let json = json!([{ "generated_text": generated }]);
        assert_eq!(
            HuggingFaceClient::parse_response(&json, "Tell me a joke.").unwrap(),
            "Why did the chicken cross the road?"
        );
    }

    #[test]
    fn test_object_and_string_shapes() {
        let object = json!({ "generated_text": " Paris. " });
        assert_eq!(HuggingFaceClient::parse_response(&object, "Capital?").unwrap(), "Paris.");

        let string = json!("Just text");
        assert_eq!(HuggingFaceClient::parse_response(&string, "prompt").unwrap(), "Just text");

        let list_of_strings = json!(["first", "second"]);
        assert_eq!(
            HuggingFaceClient::parse_response(&list_of_strings, "prompt").unwrap(),
            "first"
        );
    }

    #[test]
    fn test_only_echo_is_empty() {
        let json = json!([{ "generated_text": "Hello?" }]);
        assert_eq!(
            HuggingFaceClient::parse_response(&json, "Hello?"),
            Err(ProviderError::Unknown("empty response".to_string()))
        );
    }

    #[test]
    fn test_loading_model_is_retryable() {
        let json = json!({ "error": "Model x/y is currently loading", "estimated_time": 20.0 });
        assert!(HuggingFaceClient::parse_response(&json, "p").unwrap_err().is_retryable());

        let json = json!({ "error": "Input validation error" });
        assert!(matches!(
            HuggingFaceClient::parse_response(&json, "p"),
            Err(ProviderError::Unknown(_))
        ));
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(matches!(
            HuggingFaceClient::parse_response(&json!(42), "p"),
            Err(ProviderError::Unknown(_))
        ));
        assert!(matches!(
            HuggingFaceClient::parse_response(&json!([]), "p"),
            Err(ProviderError::Unknown(_))
        ));
    }

    #[test]
    fn test_zero_temperature_disables_sampling() {
        let body = HuggingFaceClient::build_request_body(
            "Hi",
            &GenerationConfig::default().with_temperature(0.0),
        );
        assert_eq!(body["inputs"], "Hi");
        assert_eq!(body["parameters"]["do_sample"], false);
        assert!(body["parameters"].get("temperature").is_none());

        let body = HuggingFaceClient::build_request_body("Hi", &GenerationConfig::default());
        assert_eq!(body["parameters"]["max_new_tokens"], 800);
        assert!(body["parameters"].get("temperature").is_some());
    }
}

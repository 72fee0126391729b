//! Shared HTTP plumbing for the provider adapters: client construction,
//! status mapping and response-body handling.

use chatgate_application::ProviderError;
use chatgate_domain::util::preview;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("chatgate/", env!("CARGO_PKG_VERSION"));

/// Markers a vendor puts in a 400 body when a safety filter fired
const POLICY_MARKERS: [&str; 5] = [
    "SAFETY",
    "blocked",
    "content_policy",
    "content_filter",
    "PROHIBITED_CONTENT",
];

pub(crate) fn build_http_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| ProviderError::Unavailable(format!("failed to build HTTP client: {}", e)))
}

/// Map a non-success HTTP status (and its body) to a provider error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = format!("HTTP {}: {}", status.as_u16(), preview(body.trim(), 200));

    if body.contains("is currently loading") {
        return ProviderError::Unavailable(detail);
    }

    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationFailed(detail),
        429 => ProviderError::RateLimitedByProvider,
        502..=504 => ProviderError::Unavailable(detail),
        400 if body.contains("API_KEY_INVALID") => ProviderError::AuthenticationFailed(detail),
        400 if POLICY_MARKERS.iter().any(|m| body.contains(m)) => {
            ProviderError::ContentPolicyRejected(detail)
        }
        _ => ProviderError::Unknown(detail),
    }
}

/// Connection failures and client-side timeouts are transient.
pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_connect() || e.is_timeout() {
        ProviderError::Unavailable(e.to_string())
    } else {
        ProviderError::Unknown(e.to_string())
    }
}

/// Empty generations count as failures.
pub(crate) fn non_empty(text: &str) -> Result<String, ProviderError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ProviderError::Unknown("empty response".to_string()))
    } else {
        Ok(text.to_string())
    }
}

/// Send a request and decode the JSON body of a successful response.
pub(crate) async fn send_json(
    provider: &str,
    request: RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    debug!("{} responded with HTTP {}", provider, status.as_u16());

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Unknown(format!("invalid response body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "denied"),
            ProviderError::AuthenticationFailed(_)
        ));
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ProviderError::RateLimitedByProvider
        );
        for status in [
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            assert!(status_error(status, "").is_retryable());
        }
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            ProviderError::Unknown(_)
        ));
    }

    #[test]
    fn test_bad_request_variants() {
        assert!(matches!(
            status_error(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#
            ),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"code":"content_policy_violation"}}"#
            ),
            ProviderError::ContentPolicyRejected(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, r#"{"error":"bad json"}"#),
            ProviderError::Unknown(_)
        ));
    }

    #[test]
    fn test_model_loading_is_unavailable() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Model HuggingFaceH4/zephyr-7b-beta is currently loading"}"#,
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  hi \n").unwrap(), "hi");
        assert_eq!(
            non_empty(" \n "),
            Err(ProviderError::Unknown("empty response".to_string()))
        );
    }
}

//! Wisdom Gate provider implementation

use crate::conversion::response_converter::parse_upstream_body;
use crate::core::provider::{Provider, ProviderError, ProviderReply};
use crate::models::chat::ChatCompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Forwards chat requests to the Wisdom Gate chat-completions API
pub struct WisdomGateProvider {
    client: Client,
    base_url: String,
}

impl WisdomGateProvider {
    /// Create a new Wisdom Gate provider
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL, without the `/chat/completions` suffix
    /// * `timeout_ms` - Upstream request timeout in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(base_url: String, timeout_ms: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl Provider for WisdomGateProvider {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let url = self.completions_url();
        debug!("Forwarding chat request to {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Upstream request timed out");
                    ProviderError::Timeout
                } else {
                    error!("Upstream request failed: {}", e);
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) if e.is_timeout() => return Err(ProviderError::Timeout),
            Err(e) => {
                warn!("Failed to read upstream body: {}", e);
                String::new()
            }
        };

        if !status.is_success() {
            warn!("Upstream returned status {}", status.as_u16());
        }

        Ok(ProviderReply {
            status: if status.is_success() { 200 } else { status.as_u16() },
            payload: parse_upstream_body(&raw),
        })
    }

    fn provider_name(&self) -> &str {
        "wisdom-gate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "wisdom-ai-dsv3".to_string(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: Some(16),
        }
    }

    #[tokio::test]
    async fn test_forwards_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-client"))
            .and(body_json(json!({
                "model": "wisdom-ai-dsv3",
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 16
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WisdomGateProvider::new(format!("{}/v1/", server.uri()), 5_000).unwrap();
        let reply = provider
            .create_chat_completion(&request(), "sk-client")
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.payload, json!({"id": "x"}));
    }

    #[tokio::test]
    async fn test_relays_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})),
            )
            .mount(&server)
            .await;

        let provider = WisdomGateProvider::new(server.uri(), 5_000).unwrap();
        let reply = provider
            .create_chat_completion(&request(), "sk-client")
            .await
            .unwrap();

        assert_eq!(reply.status, 401);
        assert_eq!(reply.payload["error"]["message"], "bad key");
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let provider = WisdomGateProvider::new(server.uri(), 50).unwrap();
        let result = provider.create_chat_completion(&request(), "sk-client").await;

        assert!(matches!(result, Err(ProviderError::Timeout)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_maps_to_network_error() {
        let provider = WisdomGateProvider::new("http://127.0.0.1:1".to_string(), 5_000).unwrap();
        let result = provider.create_chat_completion(&request(), "sk-client").await;

        assert!(matches!(result, Err(ProviderError::Network(_))));
    }
}

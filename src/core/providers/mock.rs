//! Offline echo provider

use crate::conversion::response_converter::echo_completion;
use crate::core::provider::{Provider, ProviderError, ProviderReply};
use crate::models::chat::ChatCompletionRequest;
use async_trait::async_trait;
use tracing::debug;

/// Answers every request locally with an echo of the last user message
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
        _api_key: &str,
    ) -> Result<ProviderReply, ProviderError> {
        debug!("Answering {} request from mock provider", request.model);
        let completion = echo_completion(request);
        let payload = serde_json::to_value(&completion)
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(ProviderReply {
            status: 200,
            payload,
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;

    #[tokio::test]
    async fn test_echoes_last_user_message() {
        let request = ChatCompletionRequest {
            model: "wisdom-ai-gpt5".to_string(),
            messages: vec![ChatMessage::user("ping")],
            max_tokens: None,
        };

        let reply = MockProvider::new()
            .create_chat_completion(&request, "key")
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.payload["choices"][0]["message"]["content"],
            "Echo (wisdom-ai-gpt5): ping"
        );
    }
}

//! Provider abstraction for answering relayed chat requests
//!
//! The relay talks to a `Provider` so that the real upstream and the offline
//! echo mode are interchangeable behind the same handler.

use crate::models::chat::ChatCompletionRequest;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error types for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upstream timeout")]
    Timeout,

    #[error("Upstream network error: {0}")]
    Network(String),
}

/// Status and JSON payload returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub status: u16,
    pub payload: Value,
}

/// Trait for chat-completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Answer a validated chat completion request on behalf of `api_key`
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ProviderReply, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

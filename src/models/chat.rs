//! Chat-completion data models
//!
//! This module defines the request, reply, and error structures exchanged
//! with the Wisdom Gate chat-completions API and the local relay.

use serde::{Deserialize, Serialize};

/// A single role/content message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the `user` role
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: crate::core::constants::role::USER.to_string(),
            content: content.into(),
        }
    }

    /// Create a message with the `assistant` role
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: crate::core::constants::role::ASSISTANT.to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Content of the most recent `user` message, if any
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::core::constants::role::USER)
            .map(|m| m.content.as_str())
    }
}

/// Chat completion reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// Error envelope returned by the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                detail: None,
            },
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                detail: Some(detail.into()),
            },
        }
    }
}

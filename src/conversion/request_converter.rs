//! Validation of incoming relay requests
//!
//! Converts an untrusted `/api/chat` body into a typed
//! [`ChatCompletionRequest`], resolving UI model labels along the way.

use crate::core::model_catalog::{allowed_models, resolve_model};
use crate::models::chat::{ChatCompletionRequest, ChatMessage, ErrorBody};
use axum::http::StatusCode;
use serde_json::{Map, Value};
use tracing::debug;

/// Reasons a relay request is rejected before reaching a provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Missing API key. Provide in Authorization: Bearer <key> or X-API-Key.")]
    MissingApiKey,

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Invalid model. Allowed: {allowed}")]
    InvalidModel { allowed: String },

    #[error("Invalid messages. Expected array of {{ role, content }}.")]
    InvalidMessages,
}

impl RequestError {
    /// HTTP status the relay answers with
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody::new(self.to_string())
    }
}

/// Parse and validate a raw `/api/chat` body
///
/// An empty body is treated as `{}`. `max_tokens` is kept only when it is a
/// non-negative integer that fits in a `u32`.
///
/// # Errors
///
/// Returns the first [`RequestError`] encountered, checked in the order:
/// size, JSON syntax, model, messages.
pub fn convert_chat_body(
    raw: &[u8],
    max_body_bytes: usize,
) -> Result<ChatCompletionRequest, RequestError> {
    if raw.len() > max_body_bytes {
        return Err(RequestError::BodyTooLarge);
    }

    let data: Value = if raw.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(raw).map_err(|e| {
            debug!("Rejecting body that is not JSON: {}", e);
            RequestError::InvalidJson
        })?
    };

    let model = data
        .get("model")
        .and_then(Value::as_str)
        .and_then(resolve_model)
        .ok_or_else(|| RequestError::InvalidModel {
            allowed: allowed_models(),
        })?;

    let messages = data
        .get("messages")
        .and_then(convert_messages)
        .ok_or(RequestError::InvalidMessages)?;

    let max_tokens = data
        .get("max_tokens")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok());

    Ok(ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens,
    })
}

/// Every entry must be an object with string `role` and `content`
fn convert_messages(value: &Value) -> Option<Vec<ChatMessage>> {
    value
        .as_array()?
        .iter()
        .map(|m| {
            Some(ChatMessage {
                role: m.get("role")?.as_str()?.to_string(),
                content: m.get("content")?.as_str()?.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LIMIT: usize = 262_144;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_converts_valid_body() {
        let raw = body(json!({
            "model": "wisdom-ai-dsv3 (via DeepseekV3)",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": 100
        }));

        let request = convert_chat_body(&raw, LIMIT).unwrap();

        assert_eq!(request.model, "wisdom-ai-dsv3");
        assert_eq!(request.messages, vec![ChatMessage::user("hi")]);
        assert_eq!(request.max_tokens, Some(100));
    }

    #[test]
    fn test_drops_non_integer_max_tokens() {
        for max_tokens in [json!(1.5), json!(-3), json!("100"), json!(null)] {
            let raw = body(json!({
                "model": "wisdom-ai-gpt5",
                "messages": [],
                "max_tokens": max_tokens
            }));
            assert_eq!(convert_chat_body(&raw, LIMIT).unwrap().max_tokens, None);
        }
    }

    #[test]
    fn test_rejects_oversized_body() {
        let raw = vec![b' '; 32];
        assert_eq!(convert_chat_body(&raw, 16), Err(RequestError::BodyTooLarge));
        assert_eq!(RequestError::BodyTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert_eq!(
            convert_chat_body(b"{not json", LIMIT),
            Err(RequestError::InvalidJson)
        );
    }

    #[test]
    fn test_empty_body_fails_on_model() {
        let err = convert_chat_body(b"", LIMIT).unwrap_err();
        assert!(matches!(err, RequestError::InvalidModel { .. }));
        assert!(err.to_string().starts_with("Invalid model. Allowed: wisdom-ai-gpt5, "));
    }

    #[test]
    fn test_rejects_malformed_messages() {
        for messages in [
            json!("hello"),
            json!([{"role": "user"}]),
            json!([{"role": "user", "content": 5}]),
            json!([null]),
        ] {
            let raw = body(json!({"model": "wisdom-ai-gpt5", "messages": messages}));
            assert_eq!(
                convert_chat_body(&raw, LIMIT),
                Err(RequestError::InvalidMessages)
            );
        }
    }

    #[test]
    fn test_invalid_messages_message_text() {
        assert_eq!(
            RequestError::InvalidMessages.to_string(),
            "Invalid messages. Expected array of { role, content }."
        );
    }
}

//! Conversion of provider output into relay payloads

use crate::core::constants::mock;
use crate::models::chat::{ChatChoice, ChatCompletion, ChatCompletionRequest, ChatMessage, ErrorBody};
use serde_json::{Map, Value};

/// Interpret an upstream body as JSON
///
/// An empty body becomes `{}`. Text that is not JSON is wrapped as
/// `{"error": {"message": <text>}}`.
pub fn parse_upstream_body(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Object(Map::new());
    }

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => serde_json::to_value(ErrorBody::new(raw))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

/// Build the canned completion returned in mock mode
pub fn echo_completion(request: &ChatCompletionRequest) -> ChatCompletion {
    let echoed = request.last_user_content().unwrap_or_default();

    ChatCompletion {
        id: mock::COMPLETION_ID.to_string(),
        object: mock::OBJECT.to_string(),
        model: request.model.clone(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage::assistant(format!("Echo ({}): {}", request.model, echoed)),
            finish_reason: Some(mock::FINISH_REASON.to_string()),
        }],
    }
}

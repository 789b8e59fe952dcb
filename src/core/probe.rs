//! One-shot chat request runner
//!
//! A probe sends exactly one chat-completion POST to a fixed endpoint and
//! prints the status, headers, and body for a human to read. Failures are
//! reported on the same output and never propagated to the caller.

use crate::core::constants::probe::{API_KEY, KEY_PREVIEW_CHARS, MAX_TOKENS, MODEL};
use crate::core::constants::endpoint;
use crate::models::chat::{ChatCompletionRequest, ChatMessage};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, warn};

/// Error types that can occur while running a probe
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("{0}")]
    Network(reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where a probe sends its request and how it introduces itself
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub banner: &'static str,
    pub endpoint: String,
    pub accept: Option<&'static str>,
}

impl ProbeTarget {
    /// The Wisdom Gate chat-completions endpoint
    pub fn remote() -> Self {
        Self {
            banner: "Testing Wisdom Gate API...",
            endpoint: endpoint::REMOTE_CHAT_COMPLETIONS.to_string(),
            accept: None,
        }
    }

    /// The relay listening on the loopback address
    pub fn local() -> Self {
        Self {
            banner: "Testing local server API...",
            endpoint: endpoint::LOCAL_CHAT.to_string(),
            accept: None,
        }
    }

    /// The remote endpoint with an explicit `Accept: */*`
    pub fn hello() -> Self {
        Self {
            banner: "Sending Hello to Wisdom Gate API...",
            endpoint: endpoint::REMOTE_CHAT_COMPLETIONS.to_string(),
            accept: Some("*/*"),
        }
    }
}

/// Final state of a probe run
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Status 200 with a JSON body
    Success(Value),
    /// Any status other than 200
    HttpError(u16),
    /// Transport or parse failure, carrying the error text
    Exception(String),
}

/// Request body used by the verbose probes
pub fn test_message_request(content: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: vec![ChatMessage::user(content)],
        max_tokens: Some(MAX_TOKENS),
    }
}

/// Request body used by the minimal `Hello` probe
pub fn hello_request() -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: vec![ChatMessage::user("Hello")],
        max_tokens: None,
    }
}

/// A single-use chat probe
pub struct ChatProbe {
    target: ProbeTarget,
    api_key: String,
}

impl ChatProbe {
    /// Create a probe for `target` using the built-in API key
    pub fn new(target: ProbeTarget) -> Self {
        Self::with_api_key(target, API_KEY)
    }

    pub fn with_api_key(target: ProbeTarget, api_key: impl Into<String>) -> Self {
        Self {
            target,
            api_key: api_key.into(),
        }
    }

    /// Send `request` once and print the report to `out`
    ///
    /// # Errors
    ///
    /// Only fails if writing to `out` fails; every request error is printed
    /// as an `Exception:` line and reported as [`ProbeOutcome::Exception`].
    pub async fn run<W: Write>(
        &self,
        request: &ChatCompletionRequest,
        out: &mut W,
    ) -> std::io::Result<ProbeOutcome> {
        writeln!(out, "{}", self.target.banner)?;
        writeln!(out, "API Key: {}...", key_preview(&self.api_key))?;
        writeln!(out, "URL: {}", self.target.endpoint)?;
        writeln!(out)?;

        let outcome = match self.exchange(request, out).await {
            Ok(outcome) => outcome,
            Err(ExchangeError::Io(e)) => return Err(e),
            Err(ExchangeError::Probe(e)) => {
                warn!("Probe failed: {}", e);
                ProbeOutcome::Exception(e.to_string())
            }
        };

        if let ProbeOutcome::Exception(message) = &outcome {
            writeln!(out, "Exception: {}", message)?;
        }
        Ok(outcome)
    }

    /// Perform the request and print everything up to the verdict line
    async fn exchange<W: Write>(
        &self,
        request: &ChatCompletionRequest,
        out: &mut W,
    ) -> Result<ProbeOutcome, ExchangeError> {
        let client = Client::builder().build().map_err(ProbeError::Client)?;

        let mut req_builder = client
            .post(&self.target.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key);

        if let Some(accept) = self.target.accept {
            req_builder = req_builder.header(ACCEPT, accept);
        }

        debug!(
            "Sending probe request: url={}, model={}, messages={}",
            self.target.endpoint,
            request.model,
            request.messages.len()
        );

        let response = req_builder
            .json(request)
            .send()
            .await
            .map_err(ProbeError::Network)?;

        let status = response.status().as_u16();
        let headers = header_map_to_pairs(response.headers());
        let text = response.text().await.map_err(ProbeError::Body)?;

        writeln!(out, "Status Code: {}", status)?;
        writeln!(out, "Response Headers: {:?}", headers)?;
        writeln!(out, "Response Text: {}", text)?;

        if status != 200 {
            writeln!(out, "Error: HTTP {}", status)?;
            return Ok(ProbeOutcome::HttpError(status));
        }

        let parsed: Value = serde_json::from_str(&text).map_err(ProbeError::from)?;
        let pretty = serde_json::to_string_pretty(&parsed).map_err(ProbeError::from)?;
        writeln!(out, "Success! Response: {}", pretty)?;
        Ok(ProbeOutcome::Success(parsed))
    }
}

/// Output failures stay separate from request failures
#[derive(Debug, thiserror::Error)]
enum ExchangeError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// First characters of the key shown in the banner
fn key_preview(api_key: &str) -> String {
    api_key.chars().take(KEY_PREVIEW_CHARS).collect()
}

/// Flatten response headers into an ordered name → value map
///
/// Repeated headers are joined with `", "`.
fn header_map_to_pairs(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut pairs: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        pairs
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    pairs
}

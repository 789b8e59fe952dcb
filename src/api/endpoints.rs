//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the local relay: chat
//! forwarding, health checks, and CORS handling for browser clients.

use crate::conversion::request_converter::{RequestError, convert_chat_body};
use crate::core::config::Config;
use crate::core::constants::{cors, endpoint};
use crate::core::provider::{Provider, ProviderError};
use crate::models::chat::ErrorBody;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION,
        },
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn Provider>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root).fallback(not_found))
        .route(endpoint::HEALTH_PATH, get(health_check).fallback(not_found))
        .route(endpoint::CHAT_PATH, post(handle_chat).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

/// Answer preflight requests and attach CORS headers to everything else
async fn cors_layer(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(cors::ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(cors::ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(cors::ALLOW_METHODS),
    );
}

/// Extract the client's API key from request headers
///
/// A non-blank `x-api-key` wins. Otherwise `Authorization: Bearer <key>` is
/// used (scheme matched case-insensitively), and finally a raw
/// `Authorization` value containing no spaces.
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(key) = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
    {
        return Some(key.to_string());
    }

    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())?;

    let is_bearer = auth
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer"))
        && auth[6..].starts_with(char::is_whitespace);
    if is_bearer {
        let key = auth[6..].trim();
        return (!key.is_empty()).then(|| key.to_string());
    }

    if !auth.is_empty() && !auth.contains(' ') {
        return Some(auth.trim().to_string());
    }

    None
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn reject(err: RequestError) -> Response {
    warn!("Rejecting chat request: {}", err);
    json_response(err.status(), err.to_error_body())
}

/// POST /api/chat - Validate and forward a chat completion
async fn handle_chat(State(state): State<AppState>, headers: HeaderMap, body: Body) -> Response {
    let request_id = uuid::Uuid::new_v4();
    debug!("Chat request received: id={}", request_id);

    let Some(api_key) = extract_api_key(&headers) else {
        return reject(RequestError::MissingApiKey);
    };
    debug!(
        "API key extracted: {}...",
        api_key.chars().take(10).collect::<String>()
    );

    let max_body_bytes = state.config.request.max_body_bytes;
    let raw = match to_bytes(body, max_body_bytes).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Failed to read chat body: {}", e);
            return reject(RequestError::BodyTooLarge);
        }
    };

    let request = match convert_chat_body(&raw, max_body_bytes) {
        Ok(request) => request,
        Err(e) => return reject(e),
    };

    info!(
        "📥 Incoming chat request: id={}, model={}, messages={}, provider={}",
        request_id,
        request.model,
        request.messages.len(),
        state.provider.provider_name()
    );

    match state
        .provider
        .create_chat_completion(&request, &api_key)
        .await
    {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            if !status.is_success() {
                warn!("Relaying upstream error: id={}, status={}", request_id, status);
            }
            json_response(status, reply.payload)
        }
        Err(ProviderError::Timeout) => {
            error!("Upstream timeout: id={}", request_id);
            json_response(StatusCode::GATEWAY_TIMEOUT, ErrorBody::new("Upstream timeout"))
        }
        Err(ProviderError::Network(detail)) => {
            error!("Upstream network error: id={}, detail={}", request_id, detail);
            json_response(
                StatusCode::BAD_GATEWAY,
                ErrorBody::with_detail("Upstream network error", detail),
            )
        }
    }
}

/// GET / - Root endpoint
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": "Wisdom Gate relay",
        "status": "running",
        "provider": state.provider.provider_name(),
        "config": {
            "upstream_base_url": state.config.upstream.base_url,
            "upstream_timeout_ms": state.config.upstream.timeout_ms,
            "max_body_bytes": state.config.request.max_body_bytes,
            "mock_ai": state.config.request.mock_ai,
        },
        "endpoints": {
            "chat": endpoint::CHAT_PATH,
            "health": endpoint::HEALTH_PATH,
        },
    }))
}

/// GET /health - Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, ErrorBody::new("Not found"))
}

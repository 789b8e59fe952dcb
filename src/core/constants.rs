//! Constants for endpoints, credentials, and message roles
//!
//! The probe binaries take no configuration; everything they send is defined
//! here.

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";

    /// Assistant role identifier
    pub const ASSISTANT: &str = "assistant";
}

/// Endpoint constants
pub mod endpoint {
    /// Wisdom Gate API base URL
    pub const VENDOR_BASE: &str = "https://wisdom-gate.juheapi.com/v1";

    /// Remote chat-completions endpoint
    pub const REMOTE_CHAT_COMPLETIONS: &str = "https://wisdom-gate.juheapi.com/v1/chat/completions";

    /// Chat endpoint of a relay running on the developer machine
    pub const LOCAL_CHAT: &str = "http://localhost:8787/api/chat";

    /// Relay route path for chat requests
    pub const CHAT_PATH: &str = "/api/chat";

    /// Relay route path for health checks
    pub const HEALTH_PATH: &str = "/health";
}

/// Probe request constants
pub mod probe {
    /// Bearer token sent by the probes. Replace with a real key before running.
    pub const API_KEY: &str = "sk-replace-with-your-wisdom-gate-key";

    /// Model requested by the probes
    pub const MODEL: &str = "wisdom-ai-dsv3";

    /// Token cap used by the verbose probes
    pub const MAX_TOKENS: u32 = 100;

    /// Number of key characters shown in the banner
    pub const KEY_PREVIEW_CHARS: usize = 10;
}

/// CORS header values attached to every relay response
pub mod cors {
    pub const ALLOW_ORIGIN: &str = "*";
    pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-API-Key";
    pub const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
}

/// Mock completion constants
pub mod mock {
    pub const COMPLETION_ID: &str = "mock-chatcmpl-1";
    pub const OBJECT: &str = "chat.completion";
    pub const FINISH_REASON: &str = "stop";
}

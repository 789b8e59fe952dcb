//! Model catalog for the Wisdom Gate API
//!
//! This module lists the canonical model codes and resolves the
//! frontend-friendly labels (`<code> (via <Name>)`) back to those codes.

/// Canonical model codes accepted upstream
pub const MODEL_CODES: [&str; 7] = [
    "wisdom-ai-gpt5",
    "wisdom-ai-gpt5-mini",
    "wisdom-ai-gpt5-nano",
    "wisdom-ai-dsv3",
    "wisdom-ai-dsr1",
    "wisdom-ai-claude-sonnet-4",
    "wisdom-ai-gemini-2.5-flash",
];

/// UI labels mapped to their canonical codes
const MODEL_LABELS: [(&str, &str); 7] = [
    ("wisdom-ai-gpt5 (via Gpt5)", "wisdom-ai-gpt5"),
    ("wisdom-ai-gpt5-mini (via Gpt5 Mini)", "wisdom-ai-gpt5-mini"),
    ("wisdom-ai-gpt5-nano (via Gpt5 Nano)", "wisdom-ai-gpt5-nano"),
    ("wisdom-ai-dsv3 (via DeepseekV3)", "wisdom-ai-dsv3"),
    ("wisdom-ai-dsr1 (via DeepseekR1)", "wisdom-ai-dsr1"),
    (
        "wisdom-ai-claude-sonnet-4 (via Claude Sonnet 4)",
        "wisdom-ai-claude-sonnet-4",
    ),
    (
        "wisdom-ai-gemini-2.5-flash (via Gemini 2.5 Flash)",
        "wisdom-ai-gemini-2.5-flash",
    ),
];

/// Resolve a model code or UI label to a canonical model code
///
/// Exact labels are looked up first, then a trailing ` (via ...)` suffix is
/// stripped, and finally the input is matched as a code.
///
/// # Returns
///
/// The canonical code, or `None` if the input names no known model
pub fn resolve_model(input: &str) -> Option<&'static str> {
    if input.is_empty() {
        return None;
    }

    if let Some((_, code)) = MODEL_LABELS.iter().find(|(label, _)| *label == input) {
        return Some(code);
    }

    if let Some(stripped) = strip_via_suffix(input) {
        if let Some(code) = find_code(stripped) {
            return Some(code);
        }
    }

    find_code(input)
}

/// Comma-separated list of codes for error messages
pub fn allowed_models() -> String {
    MODEL_CODES.join(", ")
}

fn find_code(candidate: &str) -> Option<&'static str> {
    MODEL_CODES.iter().copied().find(|code| *code == candidate)
}

/// Strip a trailing `(via <name>)` group and the whitespace around it
fn strip_via_suffix(input: &str) -> Option<&str> {
    let inner = input.trim_end().strip_suffix(')')?;
    let open = inner.rfind("(via ")?;
    let name = &inner[open + "(via ".len()..];
    if name.is_empty() || name.contains(')') {
        return None;
    }
    Some(inner[..open].trim_end())
}

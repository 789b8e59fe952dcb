//! Logging configuration and initialization
//!
//! Sets up the tracing subscriber shared by the relay and the probes. Log
//! lines go to stderr so probe reports on stdout stay clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the specified level
///
/// `RUST_LOG` takes precedence when set. Otherwise the given level is used,
/// with `warning` mapped to `warn` and `critical` to `error`; anything
/// unrecognised falls back to `info`.
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(log_level)));

    // A second initialization (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Map a configured level onto a tracing filter directive
fn normalize_level(log_level: &str) -> &'static str {
    // Only the first word counts, so trailing comments are ignored
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or("info")
        .to_lowercase();

    match level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => "info",
    }
}

//! Wisdom Gate local relay
//!
//! Accepts chat requests on `/api/chat` and forwards them to the Wisdom Gate
//! chat-completions API, or answers with echo completions in mock mode.

use std::sync::Arc;
use tracing::{error, info};
use wisdom_gate_relay::api::endpoints::{AppState, create_router};
use wisdom_gate_relay::core::config::Config;
use wisdom_gate_relay::core::logging::init_logging;
use wisdom_gate_relay::core::provider::Provider;
use wisdom_gate_relay::core::providers::{MockProvider, WisdomGateProvider};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.server.log_level);

    print_startup_banner(&config);

    let provider: Arc<dyn Provider> = if config.request.mock_ai {
        Arc::new(MockProvider::new())
    } else {
        match WisdomGateProvider::new(
            config.upstream.base_url.clone(),
            config.upstream.timeout_ms,
        ) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!("Failed to create HTTP client: {}", e);
                std::process::exit(1);
            }
        }
    };

    info!("Using provider: {}", provider.provider_name());

    let app = create_router(AppState {
        config: config.clone(),
        provider,
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    let display_host = match config.server.host.as_str() {
        "0.0.0.0" | "::" => "localhost",
        host => host,
    };
    info!("Open http://{}:{} in your browser.", display_host, config.server.port);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("Wisdom Gate relay v{}", env!("CARGO_PKG_VERSION"));
    println!("   Upstream: {}", config.upstream.base_url);
    println!("   Upstream Timeout: {}ms", config.upstream.timeout_ms);
    println!("   Max Body Size: {} bytes", config.request.max_body_bytes);
    println!(
        "   Mock Mode: {}",
        if config.request.mock_ai {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("   Server: {}:{}", config.server.host, config.server.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Wisdom Gate relay v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: wisdom-gate-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Configuration file (TOML):");
    println!("  CONFIG_PATH - Path to the config file (default: config.toml, optional)");
    println!();
    println!("Environment overrides:");
    println!("  HOST - Server host (default: 0.0.0.0)");
    println!("  PORT - Server port (default: 8787)");
    println!("  LOG_LEVEL - Logging level (default: info)");
    println!("  DEBUG - Any non-empty value enables debug logging");
    println!("  UPSTREAM_TIMEOUT_MS - Upstream request timeout (default: 20000)");
    println!("  MOCK_AI - 1 or true to answer with echo completions");
    println!();
    println!("Endpoints:");
    println!("  POST /api/chat - Forward a chat completion request");
    println!("  GET  /health   - Health check");
}

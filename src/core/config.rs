//! Relay configuration management
//!
//! This module loads the relay configuration from an optional TOML file and
//! applies environment overrides on top. Everything is validated at startup.

use crate::core::constants::endpoint::VENDOR_BASE;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default server port
const DEFAULT_PORT: u16 = 8787;

/// Default upstream timeout in milliseconds
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 20_000;

/// Default request body cap (256 KiB)
const DEFAULT_MAX_BODY_BYTES: usize = 262_144;

/// Config file used when `CONFIG_PATH` is unset
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Answer locally with echo completions instead of calling upstream
    #[serde(default)]
    pub mock_ai: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            mock_ai: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    VENDOR_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_MS
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Relay configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load configuration from the environment
    ///
    /// Reads `CONFIG_PATH` (or `config.toml` when present), then applies
    /// `HOST`, `PORT`, `LOG_LEVEL`, `DEBUG`, `UPSTREAM_TIMEOUT_MS` and
    /// `MOCK_AI` overrides, then validates.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.server.log_level = level;
        }
        if lookup("DEBUG").is_some_and(|v| !v.is_empty()) {
            self.server.log_level = "debug".to_string();
        }
        if let Some(timeout) = lookup("UPSTREAM_TIMEOUT_MS") {
            self.upstream.timeout_ms = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid UPSTREAM_TIMEOUT_MS value: {}", timeout))?;
        }
        if let Some(mock) = lookup("MOCK_AI") {
            self.request.mock_ai = is_truthy(&mock);
        }
        Ok(())
    }

    /// Reject configurations the relay cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be non-zero");
        }
        if self.upstream.timeout_ms == 0 {
            bail!("Upstream timeout must be greater than zero");
        }
        if !(self.upstream.base_url.starts_with("http://")
            || self.upstream.base_url.starts_with("https://"))
        {
            bail!(
                "Upstream base URL must start with http:// or https://: {}",
                self.upstream.base_url
            );
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            log_level = "warning"

            [upstream]
            base_url = "http://127.0.0.1:9999/v1"
            timeout_ms = 1500

            [request]
            max_body_bytes = 1024
            mock_ai = true
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_load_config() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.upstream.timeout_ms, 1500);
        assert_eq!(config.request.max_body_bytes, 1024);
        assert!(config.request.mock_ai);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.upstream.base_url, "https://wisdom-gate.juheapi.com/v1");
        assert_eq!(config.upstream.timeout_ms, 20_000);
        assert_eq!(config.request.max_body_bytes, 262_144);
        assert!(!config.request.mock_ai);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("HOST", "localhost"),
                ("PORT", "8080"),
                ("UPSTREAM_TIMEOUT_MS", "500"),
                ("MOCK_AI", "true"),
                ("DEBUG", "1"),
            ]))
            .unwrap();

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.timeout_ms, 500);
        assert!(config.request.mock_ai);
        assert_eq!(config.server.log_level, "debug");
    }

    #[test]
    fn test_mock_ai_only_accepts_one_or_true() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("MOCK_AI", "yes")])).unwrap();
        assert!(!config.request.mock_ai);
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        assert!(config.apply_overrides(lookup(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.upstream.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upstream.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}

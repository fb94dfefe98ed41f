//! Configuration loading and validation for Atlas.
//!
//! Loads configuration from `atlas.toml` in the working directory (optional)
//! with environment variable overrides. Every field has a serde default, so
//! a missing file is not an error — only the API key must be supplied before
//! any completion call can succeed, and that check belongs to the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "atlas.toml";

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer credential for the completion service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the completion service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout for the completion call, in seconds.
    ///
    /// A hung upstream must never leave a session pending forever, so this
    /// is always set; a timeout surfaces as an ordinary call failure.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.perplexity.ai".into()
}
fn default_model() -> String {
    "sonar-pro".into()
}
fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load configuration: `atlas.toml` if present, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if Path::new(CONFIG_FILE).is_file() {
            Self::load_from_path(Path::new(CONFIG_FILE))?
        } else {
            debug!("No {} found, using defaults", CONFIG_FILE);
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific TOML file (no env overrides).
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `ATLAS_*` environment variable overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ATLAS_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("ATLAS_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(model) = std::env::var("ATLAS_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(secs) = std::env::var("ATLAS_REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse() {
                self.request_timeout_secs = parsed;
            }
        }
    }
}

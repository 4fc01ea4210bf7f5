// =============================================================================
// Application Configuration — JSON file with serde defaults
// =============================================================================
//
// Every tunable lives here: where the market data backend is, where the API
// listens, how long an upstream request may take and which browser origins
// may call the API.
//
// All fields carry `#[serde(default = ...)]` so that adding new fields never
// breaks loading an older config file.  The file is read-only to the
// service: it is loaded once at startup and never written back.
// =============================================================================

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::types::Interval;

pub const CONFIG_PATH: &str = "indicator_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_backend_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the market data / asset list / backtest backend.
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,

    /// Address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Timeout for a single upstream request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Interval used when a request names none.
    #[serde(default)]
    pub default_interval: Interval,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_allowed_origins: default_cors_allowed_origins(),
            default_interval: Interval::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing or malformed file is an error so the caller can fall back to
    /// defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            backend = %config.backend_base_url,
            bind_addr = %config.bind_addr,
            "config loaded"
        );

        Ok(config)
    }

    /// Load `path`, falling back to defaults with a warning.  The file is
    /// left untouched either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Apply `INDICATOR_BACKEND_URL` / `INDICATOR_BIND_ADDR` overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("INDICATOR_BACKEND_URL") {
            let url = url.trim();
            if !url.is_empty() {
                self.backend_base_url = url.to_string();
            }
        }
        if let Ok(addr) = std::env::var("INDICATOR_BIND_ADDR") {
            let addr = addr.trim();
            if !addr.is_empty() {
                self.bind_addr = addr.to_string();
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

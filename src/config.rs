//! Configuration management for docscan using the prefer crate.
//!
//! Settings are layered: built-in defaults, then a config file (explicit
//! `--config` path or discovered by prefer), then environment variables.
//! The API key is only ever read from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::client::{ClientOptions, DEFAULT_API_VERSION};

/// Default address for the web UI.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default upload body limit in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 200;

pub const ENDPOINT_ENV: &str = "FORM_RECOGNIZER_ENDPOINT";
pub const KEY_ENV: &str = "FORM_RECOGNIZER_KEY";
pub const POLL_INTERVAL_ENV: &str = "DOCSCAN_POLL_INTERVAL_MS";

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Form Recognizer endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// REST API version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Delay between operation polls in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    /// Request timeout in seconds (unset = no timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Web UI bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Maximum upload size for the web UI, in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_mb: Option<usize>,
    /// Path this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no config file is found.
    pub async fn load() -> Self {
        match prefer::load("docscan").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring unreadable config: {:#}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> anyhow::Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let config: Self = match ext {
            "toml" => toml::from_str(contents).context("Failed to parse TOML config")?,
            "yaml" | "yml" => serde_yaml::from_str(contents).context("Failed to parse YAML config")?,
            _ => serde_json::from_str(contents).context("Failed to parse JSON config")?,
        };
        Ok(config)
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides discovery).
    pub config_path: Option<PathBuf>,
}

/// Resolved application settings.
#[derive(Clone)]
pub struct Settings {
    /// Default endpoint for the CLI and the pre-filled web form.
    pub endpoint: Option<String>,
    /// API key from the environment; never displayed.
    pub key: Option<String>,
    pub api_version: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub bind: String,
    pub max_upload_bytes: usize,
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: None,
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            config_path: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .field("bind", &self.bind)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("config_path", &self.config_path)
            .finish()
    }
}

impl Settings {
    /// Apply a config file on top of the current settings.
    pub fn apply_config(&mut self, config: &Config) {
        if let Some(ref endpoint) = config.endpoint {
            self.endpoint = non_empty(endpoint);
        }
        if let Some(ref version) = config.api_version {
            self.api_version = version.clone();
        }
        if let Some(ms) = config.poll_interval_ms {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = config.request_timeout {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ref bind) = config.bind {
            self.bind = bind.clone();
        }
        if let Some(mb) = config.max_upload_mb {
            self.max_upload_bytes = mb.saturating_mul(1024 * 1024);
        }
        if config.source_path.is_some() {
            self.config_path = config.source_path.clone();
        }
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).and_then(|v| non_empty(&v)) {
            self.endpoint = Some(endpoint);
        }
        if let Some(key) = lookup(KEY_ENV).and_then(|v| non_empty(&v)) {
            self.key = Some(key);
        }
        if let Some(ms) = lookup(POLL_INTERVAL_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.poll_interval = Duration::from_millis(ms);
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_version: self.api_version.clone(),
            poll_interval: self.poll_interval,
            request_timeout: self.request_timeout,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Load settings: defaults, then config file, then environment.
pub async fn load_settings(options: &LoadOptions) -> anyhow::Result<Settings> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(&expand_path(path)).await?,
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    settings.apply_config(&config);
    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

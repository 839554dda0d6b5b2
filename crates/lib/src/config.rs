//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.equied/config.json`) and environment.
//! Covers the gateway listener, the upstream completion provider and the chat client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Gateway server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Upstream chat-completion provider and model chain.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Terminal chat client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Gateway bind and port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Port for HTTP (default 15152).
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

fn default_gateway_port() -> u16 {
    15152
}

fn default_gateway_bind() -> String {
    "127.0.0.1".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            bind: default_gateway_bind(),
        }
    }
}

/// One entry in the model chain: the provider's model id and the label reported as `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub id: String,
    pub label: String,
}

impl ModelConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Upstream provider (OpenAI-compatible chat completions, OpenRouter by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// API base including version segment (default "https://openrouter.ai/api/v1").
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,

    /// Bearer key. Overridden by EQUIED_API_KEY env. Never commit this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Sent as HTTP-Referer for provider attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    /// Sent as X-Title for provider attribution.
    #[serde(default = "default_provider_title")]
    pub title: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-model wait before falling through to the next model (default 10000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Models tried in order; first success wins.
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

fn default_provider_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_provider_title() -> String {
    "Equidistributed Salary Chatbot".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    800
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_models() -> Vec<ModelConfig> {
    vec![
        ModelConfig::new("google/gemini-2.0-flash-exp:free", "gemini-2.0-flash-exp:free"),
        ModelConfig::new("meta-llama/llama-4-maverick:free", "llama-4-maverick:free"),
    ]
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            api_key: None,
            referer: None,
            title: default_provider_title(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_ms: default_request_timeout_ms(),
            models: default_models(),
        }
    }
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Chat client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Gateway base URL. When absent, derived from gateway bind and port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<String>,

    /// Client-side abort for one request, independent of the gateway's model timeouts (default 30).
    #[serde(default = "default_client_timeout_secs")]
    pub timeout_secs: u64,

    /// Favorites file (default ~/.equied/favorites.json).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites_path: Option<PathBuf>,
}

fn default_client_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: None,
            timeout_secs: default_client_timeout_secs(),
            favorites_path: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Resolve the provider API key: env EQUIED_API_KEY overrides config.
pub fn resolve_api_key(config: &Config) -> Option<String> {
    std::env::var("EQUIED_API_KEY")
        .ok()
        .and_then(|s| non_empty(&s))
        .or_else(|| config.provider.api_key.as_deref().and_then(non_empty))
}

/// Gateway URL the chat client talks to: explicit client.gatewayUrl, else http://bind:port.
pub fn resolve_gateway_url(config: &Config) -> String {
    config
        .client
        .gateway_url
        .as_deref()
        .and_then(non_empty)
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| {
            let bind = config.gateway.bind.trim();
            let host = if bind == "0.0.0.0" { "127.0.0.1" } else { bind };
            format!("http://{}:{}", host, config.gateway.port)
        })
}

/// Resolve favorites file: client.favoritesPath or ~/.equied/favorites.json.
pub fn resolve_favorites_path(config: &Config) -> PathBuf {
    config.client.favorites_path.clone().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(".equied").join("favorites.json"))
            .unwrap_or_else(|| PathBuf::from("favorites.json"))
    })
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("EQUIED_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".equied").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, else the default path (or EQUIED_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

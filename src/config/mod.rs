use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::errors::GatewayError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
    pub master_key: String,
    /// Upstream base URL without a trailing slash.
    pub upstream_url: String,
    pub user_agent: String,
    /// Client-facing model name -> upstream model name.
    pub models: BTreeMap<String, String>,
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_max_body_bytes() -> usize {
    consts::DEFAULT_MAX_BODY_BYTES
}

impl Config {
    /// Upstream name for a client-facing model, falling back to the default upstream model.
    pub fn resolve_model(&self, name: &str) -> &str {
        self.models
            .get(name)
            .map(String::as_str)
            .unwrap_or(consts::FALLBACK_UPSTREAM_MODEL)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: consts::DEFAULT_PORT,
            master_key: consts::DEFAULT_MASTER_KEY.to_string(),
            upstream_url: consts::DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: consts::DEFAULT_USER_AGENT.to_string(),
            models: default_models(),
            read_timeout_secs: None,
            max_body_bytes: consts::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

pub fn default_models() -> BTreeMap<String, String> {
    consts::DEFAULT_MODEL_MAP
        .entries()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub trait ConfigLoader: Send + Sync {
    fn load_config(&self) -> Result<Config, GatewayError>;
}

/// Reads configuration from the process environment.
pub struct EnvConfigLoader;

impl EnvConfigLoader {
    pub fn new() -> Self {
        Self
    }

    fn var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Default for EnvConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for EnvConfigLoader {
    fn load_config(&self) -> Result<Config, GatewayError> {
        let mut config = Config::default();

        if let Some(port) = Self::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("invalid PORT {port:?}: {e}")))?;
        }
        if let Some(key) = Self::var("API_MASTER_KEY") {
            config.master_key = key;
        }
        if let Some(url) = Self::var("UPSTREAM_URL") {
            config.upstream_url = url;
        }
        config.upstream_url = trim_base_url(&config.upstream_url);
        if let Some(user_agent) = Self::var("USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(raw) = Self::var("MODEL_MAP") {
            config.models = parse_model_map(&raw)?;
        }
        if let Some(secs) = Self::var("UPSTREAM_READ_TIMEOUT_SECS") {
            let secs = secs.parse().map_err(|e| {
                GatewayError::Config(format!("invalid UPSTREAM_READ_TIMEOUT_SECS {secs:?}: {e}"))
            })?;
            config.read_timeout_secs = Some(secs);
        }
        if let Some(bytes) = Self::var("MAX_BODY_BYTES") {
            config.max_body_bytes = bytes.parse().map_err(|e| {
                GatewayError::Config(format!("invalid MAX_BODY_BYTES {bytes:?}: {e}"))
            })?;
        }

        Ok(config)
    }
}

pub(crate) fn parse_model_map(raw: &str) -> Result<BTreeMap<String, String>, GatewayError> {
    let models: BTreeMap<String, String> = serde_json::from_str(raw)
        .map_err(|e| GatewayError::Config(format!("invalid MODEL_MAP: {e}")))?;
    if models.is_empty() {
        return Err(GatewayError::Config("MODEL_MAP must not be empty".to_string()));
    }
    Ok(models)
}

pub fn load_config() -> Result<Config, GatewayError> {
    let loader = EnvConfigLoader::new();
    loader.load_config()
}

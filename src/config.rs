use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL; overridden by `DATABASE_URL`.
    /// Without one the service runs on in-memory repositories.
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub events: EventsConfig,
    /// HS256 signing secret; only ever read from `JWT_SECRET`
    #[serde(skip)]
    pub jwt_secret: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: crate::gateway::cache::TTL_SECONDS,
            cleanup_interval_secs: crate::gateway::cache::CLEANUP_INTERVAL_SECONDS,
        }
    }
}

/// Status-change event publishing
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventsConfig {
    pub topic: String,
    pub queue_size: usize,
    /// POST target for events; log-only when unset
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            topic: "order_events".to_string(),
            queue_size: 1024,
            webhook_url: None,
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml` and apply environment overrides
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.postgres_url = Some(url);
        }
        config.jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET environment variable must be set")?;
        if config.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

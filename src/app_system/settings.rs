use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::storage::CART_STORAGE_KEY;

pub const DEFAULT_CONFIG_FILE: &str = "config/rocketshoes.toml";

/// Application settings.
///
/// Read from an optional TOML file, then overridden by `ROCKETSHOES_*`
/// environment variables (e.g. `ROCKETSHOES_API_BASE_URL`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Catalog API root. Without it the in-process catalog is used.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".rocketshoes")
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_channel_buffer() -> usize {
    32
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
            request_timeout_ms: default_request_timeout_ms(),
            channel_buffer: default_channel_buffer(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads settings from `path` (optional) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ROCKETSHOES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        if app_config.channel_buffer == 0 {
            return Err(ConfigError::Message("channel_buffer must be at least 1".to_string()));
        }
        Ok(app_config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

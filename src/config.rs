use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::Source;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    pub anthropic_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_feed_timeout")]
    pub feed_timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_items_per_source")]
    pub items_per_source: usize,

    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    #[serde(default = "default_recent_opinion_limit")]
    pub recent_opinion_limit: usize,

    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Replaces the built-in source registry when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opinion-forum");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("forum.db").to_string_lossy().to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_feed_timeout() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    5
}

fn default_items_per_source() -> usize {
    10
}

fn default_fetch_concurrency() -> usize {
    5
}

fn default_recent_opinion_limit() -> usize {
    50
}

fn default_generation_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            anthropic_api_key: None,
            model: default_model(),
            feed_timeout_secs: default_feed_timeout(),
            max_redirects: default_max_redirects(),
            items_per_source: default_items_per_source(),
            fetch_concurrency: default_fetch_concurrency(),
            recent_opinion_limit: default_recent_opinion_limit(),
            generation_timeout_secs: default_generation_timeout(),
            max_tokens: default_max_tokens(),
            sources: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.trim().is_empty() {
                config.anthropic_api_key = Some(key);
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opinion-forum")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.items_per_source == 0 {
            return Err(AppError::Config("items_per_source must be at least 1".into()));
        }
        if self.fetch_concurrency == 0 {
            return Err(AppError::Config("fetch_concurrency must be at least 1".into()));
        }
        if let Some(sources) = &self.sources {
            for source in sources {
                source.validate()?;
            }
        }
        Ok(())
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}

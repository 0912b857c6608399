use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const API_URL_ENV: &str = "STORYPATH_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryPathConfig {
    /// Base URL of the StoryPath REST backend, e.g. "http://localhost:3000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Filter directive for the log file, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "storypath_tui=info,storypath=info".to_string()
}

impl Default for StoryPathConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl StoryPathConfig {
    pub fn root_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("storypath-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("storypath-tui.log"))
    }

    /// Load config from disk, then apply the `STORYPATH_API_URL` override.
    /// Returns the default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

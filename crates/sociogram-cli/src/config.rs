//! Configuration management for the sociogram CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sociogram::prelude::EngineConfig;
use std::path::{Path, PathBuf};

/// Sociogram project configuration (sociogram.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Names whose messages contribute nothing (bots, bridges).
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Load config from sociogram.toml in the current or parent
    /// directories.
    pub fn load() -> Result<Self> {
        if let Some(path) = find_config_file() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Find sociogram.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join("sociogram.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

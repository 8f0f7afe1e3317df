use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::SourceId;

pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// source = "mock"
/// delay_ms = 1000
/// seed = 42
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather source short name; only "mock" exists today.
    pub source: String,

    /// Artificial latency of the mock source, in milliseconds.
    pub delay_ms: u64,

    /// Optional RNG seed for reproducible mock data.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { source: SourceId::Mock.to_string(), delay_ms: DEFAULT_DELAY_MS, seed: None }
    }
}

impl Config {
    /// Return the configured source as a strongly-typed SourceId.
    pub fn source_id(&self) -> Result<SourceId> {
        SourceId::try_from(self.source.as_str())
    }

    pub fn set_source(&mut self, id: SourceId) {
        self.source = id.as_str().to_string();
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.source_id()
            .with_context(|| format!("Invalid source in config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-panel", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

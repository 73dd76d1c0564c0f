// Global configuration management

use crate::engine::Preset;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Explicit encoder binary. When unset, a bundled `bin/ffmpeg` next to the
    /// executable is used if present, otherwise `ffmpeg` from PATH.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Preset selected when the dashboard opens
    #[serde(default)]
    pub preset: Preset,

    /// Size limit pre-filled in the dashboard (MB, 0 = unlimited)
    #[serde(default)]
    pub size_cap_mb: u64,

    /// Overwrite existing `converted_*` files instead of failing on them
    #[serde(default)]
    pub overwrite: bool,

    /// Kill the running encoder on stop and delete its partial output.
    /// When false, stop only takes effect after the current file finishes.
    #[serde(default = "default_true_config")]
    pub interrupt_on_stop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true_config")]
    pub enabled: bool,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (defaults to the cache directory)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true_config() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            size_cap_mb: 0,
            overwrite: false,
            interrupt_on_stop: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("ffbatch")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("ffbatch")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Default location of the log file
    pub fn default_log_path() -> Result<PathBuf> {
        Ok(dirs::cache_dir()
            .context("Could not determine cache directory")?
            .join("ffbatch")
            .join("ffbatch.log"))
    }

    /// Load config from disk. A missing file yields the built-in defaults;
    /// nothing is written.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Log file to use, honouring the configured override
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(path) => Ok(path.clone()),
            None => Self::default_log_path(),
        }
    }
}

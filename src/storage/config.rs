//! Configuration handling for Book Lister
//!
//! Configuration is stored in `~/.config/book-lister/config.toml` (or the
//! platform equivalent). A different file can be chosen with `--config` or
//! the `BOOKLIST_CONFIG` environment variable.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{LedgerConfig, DEFAULT_THROWAWAY_ISBNS};

/// Folder under the user's Documents directory that receives exports
pub const EXPORT_FOLDER: &str = "Listing uploads";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHome,

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ISBNs that are rejected outright
    pub throwaway_isbns: BTreeSet<String>,

    /// Where exports are written (defaults to ~/Documents/Listing uploads)
    pub export_dir: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            throwaway_isbns: DEFAULT_THROWAWAY_ISBNS.iter().map(|s| s.to_string()).collect(),
            export_dir: None,
            default_format: OutputFormat::Text,
        }
    }
}

/// Loaded configuration and the file it came from
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `explicit` or, when absent, the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let settings = match &path {
            Some(p) if p.exists() => Self::read_settings(p)?,
            _ => Settings::default(),
        };

        Ok(Self { settings, path })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "booklist", "book-lister")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    fn read_settings(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Builds the ledger configuration
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            throwaway_isbns: self.settings.throwaway_isbns.clone(),
        }
    }

    /// Returns the export directory, falling back to ~/Documents/Listing uploads
    pub fn export_dir(&self) -> Result<PathBuf> {
        match &self.settings.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_export_dir(),
        }
    }

    /// Writes the current settings to the config path
    pub fn save(&self) -> Result<PathBuf> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(&self.settings).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(path)
    }
}

/// `<home>/Documents/Listing uploads`
pub fn default_export_dir() -> Result<PathBuf> {
    let dirs = UserDirs::new().ok_or(ConfigError::NoHome)?;
    Ok(dirs.home_dir().join("Documents").join(EXPORT_FOLDER))
}

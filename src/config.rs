//! Application configuration management.
//!
//! This module handles loading and saving persistent defaults for the
//! command-line flags. Command-line flags can only switch options on; a
//! flag given on the command line always wins over the file.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include hidden entries.
    pub include_hidden: bool,
    /// Start in silent mode.
    pub silent: bool,
    /// Start in list-only mode.
    pub list_only: bool,
    /// Move duplicates to the trash instead of removing them.
    pub trash: bool,
    /// Sort duplicates by position before disposition.
    pub sort_duplicates: bool,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from an explicit path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Overlay command-line flags on top of this configuration.
    #[must_use]
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        self.include_hidden |= cli.hidden;
        self.silent |= cli.silent;
        self.list_only |= cli.list;
        self.trash |= cli.trash;
        self.sort_duplicates |= cli.sort;
        self
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "namedupe", "namedupe")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

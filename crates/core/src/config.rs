//! Application configuration.
//!
//! A small TOML file under the user's config directory plus
//! `GAMENIGHT_*` environment overrides. Every field has a default so a
//! missing file is not an error.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::library::LibraryStore;

/// Location of the config file below the user's config directory.
pub const CONFIG_FILE: &str = "gamenight/config.toml";

const DEFAULT_CONFIG: &str = "\
# gamenight configuration
#
# library_path = \"/path/to/library.tsv\"
# default_suggestions = 3
# max_suggestions = 10
";

/// Settings for the interactive session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Library file to load on startup; defaults to the config-dir path.
    #[serde(default)]
    pub library_path: Option<PathBuf>,
    /// Suggestion count the recommend form starts with.
    #[serde(default = "default_suggestions")]
    pub default_suggestions: usize,
    /// Upper bound the recommend form allows.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_suggestions() -> usize {
    3
}

fn default_max_suggestions() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            default_suggestions: default_suggestions(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl AppConfig {
    /// Path of the config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(Self::config_path()).required(false))
            .add_source(Environment::with_prefix("GAMENIGHT"))
            .build()
            .context("failed to load configuration")?;
        let config = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        Ok(config)
    }

    /// Library file the session should use.
    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(LibraryStore::default_path)
    }
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_recommend_form() {
        let config = AppConfig::default();
        assert_eq!(config.default_suggestions, 3);
        assert_eq!(config.max_suggestions, 10);
        assert!(config.library_path.is_none());
    }

    #[test]
    fn explicit_library_path_wins() {
        let config = AppConfig {
            library_path: Some(PathBuf::from("/tmp/games.tsv")),
            ..AppConfig::default()
        };
        assert_eq!(config.library_path(), PathBuf::from("/tmp/games.tsv"));
    }
}

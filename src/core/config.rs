//! Configuration with a layered lookup
//!
//! Priority order: the `--database` flag (which also absorbs `STOREMAN_DB`
//! via clap), then the user config file, then the built-in default of
//! `storeman.db` in the working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default database file, relative to the working directory
const DEFAULT_DATABASE: &str = "storeman.db";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file to open
    pub database: Option<PathBuf>,

    /// Default output format for list commands
    pub default_format: Option<String>,
}

impl Config {
    /// Load the user config file, if any. A missing or malformed file
    /// silently falls back to defaults.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    if let Ok(user) = serde_json::from_str::<Config>(&contents) {
                        config.merge(user);
                    }
                }
            }
        }

        config
    }

    /// Path to the per-user config file (~/.config/storeman/config.json on Linux)
    fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "storeman")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolve the database path after applying the CLI override
    pub fn database(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

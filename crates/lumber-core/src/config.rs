//! Registry configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::level::Level;

/// Settings applied when a registry is built and when it creates loggers.
///
/// The defaults pass everything at the master gate and create silent
/// loggers, so a logger emits nothing until it is given a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial master level.
    pub master_level: Level,
    /// Level for new loggers created without an explicit level.
    pub default_logger_level: Level,
    /// Per-name levels for new loggers created without an explicit level.
    pub loggers: BTreeMap<String, Level>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            master_level: Level::All,
            default_logger_level: Level::None,
            loggers: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown level.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Sets the initial master level.
    #[must_use]
    pub fn with_master_level(mut self, level: Level) -> Self {
        self.master_level = level;
        self
    }

    /// Sets the level new loggers fall back to.
    #[must_use]
    pub fn with_default_logger_level(mut self, level: Level) -> Self {
        self.default_logger_level = level;
        self
    }

    /// Presets the level for a named logger.
    #[must_use]
    pub fn with_logger_level(mut self, name: impl Into<String>, level: Level) -> Self {
        self.loggers.insert(name.into(), level);
        self
    }

    /// Returns the level a new logger called `name` starts with when the
    /// caller supplies none.
    #[must_use]
    pub fn level_for(&self, name: &str) -> Level {
        self.loggers
            .get(name)
            .copied()
            .unwrap_or(self.default_logger_level)
    }
}

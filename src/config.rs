//! Logger configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How the logger should be set up, usually read from a TOML file
///
/// ```toml
/// log_file = "/var/log/app.log"
/// create_dirs = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// File to append log lines to; no file means logging stays off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Create missing parent directories before opening the log file
    #[serde(default)]
    pub create_dirs: bool,
}

impl LoggerConfig {
    /// Create a config that logs to `path`
    pub fn with_log_file(path: impl Into<PathBuf>) -> Self {
        Self {
            log_file: Some(path.into()),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse logger config")
    }

    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read logger config")?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize logger config")?;
        std::fs::write(path, content).context("Failed to write logger config")?;
        Ok(())
    }
}

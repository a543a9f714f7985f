use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use schedule_editor::DEFAULT_FILE_NAME;

/// File name looked up in the working directory when `--config` is omitted.
pub const DEFAULT_CONFIG_FILE: &str = "schedules.toml";

/// CLI configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Name of the schedule file on the device
    #[serde(default = "default_remote_file_name")]
    pub remote_file_name: String,

    /// Directory standing in for the device filesystem (e.g. a mount point)
    #[serde(default)]
    pub device_dir: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_remote_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            remote_file_name: default_remote_file_name(),
            device_dir: None,
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Load config from the given path, or `schedules.toml` in the working directory.
    ///
    /// An explicit path must exist. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !config_path.exists() {
            debug!(?config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the device directory. Priority: cli_override > config file.
    pub fn resolve_device_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.device_dir.clone())
            .context("no device directory: pass --device or set device_dir in the config")
    }
}

//! Configuration management
//!
//! Handles:
//! - Per-run options (VM-resident mode, key path prefix)
//! - Persistent tool settings in TOML (vagrant binary, timeout, project dir)
//! - OS-specific settings location, overridable through `VAG2INV_CONFIG`

use crate::error::{InventoryError, Result};
use crate::execution::VagrantCli;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_ENV: &str = "VAG2INV_CONFIG";

/// Options of one inventory run, fixed before the run starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Ansible control machine resides in one of the boxes
    pub vm_mode: bool,
    /// Replacement for the directory holding `.vagrant/machines`
    pub key_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub vagrant: VagrantConfig,
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VagrantConfig {
    pub binary: String,
    pub timeout_secs: Option<u64>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub key_prefix: Option<String>,
}

impl Default for VagrantConfig {
    fn default() -> Self {
        Self {
            binary: "vagrant".to_string(),
            timeout_secs: None,
            working_dir: None,
        }
    }
}

impl ToolConfig {
    /// Load settings from `$VAG2INV_CONFIG` or the OS config directory
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| InventoryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e| InventoryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Get the settings file path
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }

        let mut path = dirs::config_dir()?;
        path.push("vag2inv");
        path.push("config.toml");
        Some(path)
    }

    /// Runner for the configured vagrant executable
    pub fn runner(&self) -> VagrantCli {
        let mut runner = VagrantCli::new(self.vagrant.binary.clone());
        if let Some(dir) = &self.vagrant.working_dir {
            runner = runner.with_working_dir(dir);
        }
        if let Some(secs) = self.vagrant.timeout_secs {
            runner = runner.with_timeout(Duration::from_secs(secs));
        }
        runner
    }
}

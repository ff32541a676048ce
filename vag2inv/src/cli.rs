use clap::Parser;
use std::path::PathBuf;
use vag2inv::config::{RunConfig, ToolConfig};

/// Generate Ansible inventory file from Vagrant.
#[derive(Parser, Debug, Clone)]
#[command(name = "vag2inv", version, about)]
pub struct Args {
    /// Inventory file to create
    pub inventory_filename: PathBuf,

    /// Also dump to stdout
    #[arg(short = 'd', long)]
    pub stdout: bool,

    /// Force overwrite inventory file
    #[arg(short, long)]
    pub force: bool,

    /// Compatible for Ansible control machine that resides in VM
    #[arg(long)]
    pub vm: bool,

    /// Rewrite the prefix part of the private key's path
    #[arg(short, long, value_name = "DIR")]
    pub prefix: Option<String>,

    /// Give up on any vagrant command running longer than this
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Vagrant executable to run
    #[arg(long, value_name = "PATH")]
    pub vagrant: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Folds command line overrides into the loaded settings
    pub fn apply_to(&self, settings: &mut ToolConfig) {
        if let Some(binary) = &self.vagrant {
            settings.vagrant.binary = binary.clone();
        }
        if self.timeout.is_some() {
            settings.vagrant.timeout_secs = self.timeout;
        }
        if self.prefix.is_some() {
            settings.inventory.key_prefix = self.prefix.clone();
        }
    }

    pub fn run_config(&self, settings: &ToolConfig) -> RunConfig {
        RunConfig {
            vm_mode: self.vm,
            key_prefix: settings.inventory.key_prefix.clone(),
        }
    }
}

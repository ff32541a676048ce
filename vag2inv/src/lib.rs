//! vag2inv - Ansible inventory generation from Vagrant
//!
//! Turns the state of a Vagrant project into an Ansible inventory:
//! - `vagrant status` must report every box as running
//! - `vagrant ssh-config` supplies address, port, user and key per box
//! - in VM-resident mode each box's internal address is read via `ifconfig`
//!
//! The library never exits the process; every fatal condition is an
//! `InventoryError` for the caller to map onto an exit code.

pub mod config;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod inventory;
pub mod output;
pub mod pipeline;
pub mod shape;
pub mod ssh_config;
pub mod status;

pub use config::{RunConfig, ToolConfig};
pub use error::{CommandError, FailureKind, InventoryError};
pub use execution::{VagrantCli, VagrantRunner};
pub use inventory::Inventory;
pub use output::InventoryWriter;
pub use pipeline::generate;
pub use ssh_config::Host;
pub use status::StatusTally;

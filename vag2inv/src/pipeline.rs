//! Inventory generation pipeline
//!
//! status → readiness gate → ssh-config → per-host line. Any fatal condition
//! stops the run before a single line is handed out.

use crate::config::RunConfig;
use crate::error::Result;
use crate::execution::VagrantRunner;
use crate::inventory::{Inventory, LineBuilder};
use crate::ssh_config;
use crate::status::StatusTally;
use tracing::info;

/// Checks that every box is running
pub fn check_status<R: VagrantRunner>(runner: &R) -> Result<StatusTally> {
    let report = runner.run(&["status"])?;
    let tally = StatusTally::from_report(&report);
    info!(
        "Running: {}  Non-running: {}",
        tally.running, tally.non_running
    );
    tally.ensure_ready()?;
    Ok(tally)
}

/// Collects and parses `vagrant ssh-config`
pub fn collect_hosts<R: VagrantRunner>(runner: &R) -> Result<Vec<ssh_config::Host>> {
    let dump = runner.run(&["ssh-config"])?;
    Ok(ssh_config::parse(&dump))
}

/// Runs the whole pipeline and returns the finished inventory
pub fn generate<R: VagrantRunner>(runner: &R, config: &RunConfig) -> Result<Inventory> {
    check_status(runner)?;

    let hosts = collect_hosts(runner)?;
    info!("Found {} hosts", hosts.len());

    let builder = LineBuilder::new(runner, config);
    let lines = hosts
        .iter()
        .map(|host| builder.line(host))
        .collect::<Result<Vec<_>>>()?;

    Ok(Inventory { lines })
}

//! vag2inv - Generate Ansible inventory file from Vagrant
//!
//! Exit codes:
//! - 0: inventory written
//! - 2: not all boxes are running
//! - 1: any other failure

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vag2inv::{pipeline, FailureKind, Inventory, InventoryError, InventoryWriter, ToolConfig};

fn run(args: &Args) -> Result<()> {
    let mut settings = ToolConfig::load().context("Failed to load settings")?;
    args.apply_to(&mut settings);

    let writer = InventoryWriter::new(&args.inventory_filename)
        .force(args.force)
        .echo(args.stdout);
    writer.check_destination()?;

    let runner = settings.runner();
    let config = args.run_config(&settings);
    let inventory = pipeline::generate(&runner, &config)?;

    let cmdline = Inventory::cmdline(std::env::args_os());
    writer.write(&inventory.render(&cmdline))?;

    info!(
        "Wrote {} hosts to {}",
        inventory.lines.len(),
        writer.path().display()
    );
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<InventoryError>().map(InventoryError::kind) {
        Some(FailureKind::NotReady) => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "vag2inv=debug" } else { "vag2inv=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/*!
Test harness for end-to-end inventory runs

Provides:
- a temporary Vagrant project directory
- a `MockVagrant` wired to it
- the same generate-then-write sequence the CLI performs
- assertions on the inventory file produced
*/

use crate::vagrant_stub::MockVagrant;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vag2inv::{pipeline, Inventory, InventoryError, InventoryWriter, RunConfig};

pub const TEST_CMDLINE: &str = "vag2inv hosts";

/// Complete harness for inventory runs
pub struct TestHarness {
    pub vagrant: MockVagrant,
    project: TempDir,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        env_logger::builder().is_test(true).try_init().ok();

        Ok(Self {
            vagrant: MockVagrant::new(),
            project: tempfile::tempdir()?,
        })
    }

    /// Root of the temporary project
    pub fn project_dir(&self) -> &Path {
        self.project.path()
    }

    /// Default inventory destination inside the project
    pub fn inventory_path(&self) -> PathBuf {
        self.project.path().join("hosts")
    }

    /// Runs the pipeline and writes to `inventory_path()`
    pub fn run(&self, config: &RunConfig) -> std::result::Result<Inventory, InventoryError> {
        self.run_into(&InventoryWriter::new(self.inventory_path()), config)
    }

    /// Runs the pipeline with a caller-supplied writer, exactly as the CLI does
    pub fn run_into(
        &self,
        writer: &InventoryWriter,
        config: &RunConfig,
    ) -> std::result::Result<Inventory, InventoryError> {
        writer.check_destination()?;
        let inventory = pipeline::generate(&self.vagrant, config)?;
        writer.write(&inventory.render(TEST_CMDLINE))?;
        log::info!("📝 Harness wrote {} lines to {}", inventory.lines.len(), writer.path().display());
        Ok(inventory)
    }

    /// Contents of the inventory file, if any
    pub fn inventory_contents(&self) -> Option<String> {
        std::fs::read_to_string(self.inventory_path()).ok()
    }

    /// Host lines of the inventory file, without header or blank lines
    pub fn host_lines(&self) -> Result<Vec<String>> {
        let contents = self
            .inventory_contents()
            .ok_or_else(|| anyhow::anyhow!("no inventory at {}", self.inventory_path().display()))?;
        Ok(contents
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// Assert that `host` has `key=value` on its line
    pub fn assert_host_var(&self, host: &str, key: &str, value: &str) -> Result<()> {
        let prefix = format!("{} ", host);
        let expected = format!("{}={}", key, value);
        let lines = self.host_lines()?;
        let line = lines
            .iter()
            .find(|line| line.starts_with(&prefix))
            .ok_or_else(|| anyhow::anyhow!("host {} not in inventory", host))?;

        if line.split(' ').any(|field| field == expected) {
            Ok(())
        } else {
            anyhow::bail!("{} missing from line: {}", expected, line)
        }
    }

    /// Assert that no inventory file was left behind
    pub fn assert_no_inventory(&self) -> Result<()> {
        if self.inventory_path().exists() {
            anyhow::bail!("unexpected inventory at {}", self.inventory_path().display());
        }
        Ok(())
    }
}

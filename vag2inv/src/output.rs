//! Inventory file output
//!
//! The destination is checked before any vagrant command runs, and the
//! document is written through a temporary file in the same directory so a
//! failed run never leaves a partial inventory behind.

use crate::error::{InventoryError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone)]
pub struct InventoryWriter {
    path: PathBuf,
    force: bool,
    to_stdout: bool,
}

impl InventoryWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            force: false,
            to_stdout: false,
        }
    }

    /// Replace an existing file instead of refusing
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Also print the document on stdout
    pub fn echo(mut self, to_stdout: bool) -> Self {
        self.to_stdout = to_stdout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Refuses an existing destination unless forced
    pub fn check_destination(&self) -> Result<()> {
        if self.path.exists() && !self.force {
            return Err(InventoryError::OutputExists(self.path.clone()));
        }
        Ok(())
    }

    /// Writes the rendered document atomically
    pub fn write(&self, document: &str) -> Result<()> {
        self.check_destination()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source: std::io::Error| InventoryError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(document.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.persist(&self.path).map_err(|e| io_err(e.error))?;
        info!("Inventory written to {}", self.path.display());

        if self.to_stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes()).map_err(io_err)?;
            stdout.flush().map_err(io_err)?;
        }

        Ok(())
    }
}

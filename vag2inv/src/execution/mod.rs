//! Vagrant command execution
//!
//! The pipeline only needs "give me stdout or an error" from the `vagrant`
//! executable. That contract is the `VagrantRunner` trait:
//! - `VagrantCli` spawns the real binary, optionally with a time limit
//! - tests substitute scripted runners

use crate::error::{CommandError, Result};
use process_control::{ChildExt, Control};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

#[cfg(test)]
pub(crate) mod scripted;

/// Runs one `vagrant` subcommand and returns its captured stdout
pub trait VagrantRunner {
    fn run(&self, args: &[&str]) -> Result<String>;
}

impl<R: VagrantRunner + ?Sized> VagrantRunner for &R {
    fn run(&self, args: &[&str]) -> Result<String> {
        (**self).run(args)
    }
}

/// Runner backed by the real `vagrant` executable
#[derive(Debug, Clone)]
pub struct VagrantCli {
    binary: String,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Default for VagrantCli {
    fn default() -> Self {
        Self {
            binary: "vagrant".to_string(),
            working_dir: None,
            timeout: None,
        }
    }
}

impl VagrantCli {
    pub fn new<S: Into<String>>(binary: S) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// Run commands from this directory instead of the current one
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Terminate any command still running after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn describe(&self, args: &[&str]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl VagrantRunner for VagrantCli {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = self.describe(args);
        let start_time = Instant::now();
        debug!("Executing: {} (timeout: {:?})", command, self.timeout);

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;

        let mut control = child.controlled_with_output();
        if let Some(limit) = self.timeout {
            control = control.time_limit(limit).terminate_for_timeout();
        }

        let output = control
            .wait()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?
            .ok_or_else(|| CommandError::TimedOut {
                command: command.clone(),
                secs: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            })?;

        debug!(
            "`{}` finished in {}ms ({})",
            command,
            start_time.elapsed().as_millis(),
            output.status
        );

        if !output.status.success() {
            return Err(CommandError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    #[test]
    fn test_stdout_is_captured() {
        let runner = VagrantCli::new("echo");
        let out = runner.run(&["running", "(virtualbox)"]).unwrap();
        assert_eq!(out, "running (virtualbox)\n");
    }

    #[test]
    fn test_invalid_utf8_output_is_decoded_lossily() {
        let runner = VagrantCli::new("printf");
        let out = runner.run(&["node1\\377"]).unwrap();
        assert_eq!(out, "node1\u{FFFD}");
    }

    #[test]
    fn test_non_zero_exit_is_a_command_failure() {
        let runner = VagrantCli::new("false");
        let err = runner.run(&["status"]).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Command(CommandError::Failed { .. })
        ));
    }

    #[test]
    fn test_missing_binary_is_a_spawn_failure() {
        let runner = VagrantCli::new("/nonexistent/vagrant-binary");
        let err = runner.run(&["status"]).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Command(CommandError::Spawn { .. })
        ));
    }

    #[test]
    fn test_command_timeout() {
        let runner = VagrantCli::new("sleep").with_timeout(Duration::from_millis(200));
        let err = runner.run(&["10"]).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Command(CommandError::TimedOut { .. })
        ));
    }

    #[test]
    fn test_working_dir_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let runner = VagrantCli::new("pwd").with_working_dir(dir.path());
        let out = runner.run(&[]).unwrap();
        let reported = std::fs::canonicalize(out.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}

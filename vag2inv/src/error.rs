//! Failure taxonomy for inventory generation
//!
//! Every fatal condition of a run is one `InventoryError` variant. The library
//! never exits the process: callers map `InventoryError::kind()` to their own
//! exit codes.

use std::path::PathBuf;

/// Errors raised while invoking the `vagrant` executable
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("`{command}` timed out after {secs}s")]
    TimedOut { command: String, secs: u64 },
}

/// Fatal conditions of an inventory run
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Abort: not all boxes are running. (running: {running}, not running: {non_running})")]
    NotReady { running: usize, non_running: usize },
    #[error("no internal address found for `{host}`: no interface listing succeeded (tried {tried})")]
    NoInternalAddress { host: String, tried: String },
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Coarse failure classes the CLI layer chooses exit codes for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EnvironmentCommand,
    NotReady,
    NoInternalAddress,
    Output,
    Config,
}

impl InventoryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Command(_) => FailureKind::EnvironmentCommand,
            Self::NotReady { .. } => FailureKind::NotReady,
            Self::NoInternalAddress { .. } => FailureKind::NoInternalAddress,
            Self::OutputExists(_) | Self::Io { .. } => FailureKind::Output,
            Self::Config { .. } => FailureKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

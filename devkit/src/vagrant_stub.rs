/*!
Mock Vagrant executable for development without VirtualBox

Lets the inventory pipeline run against canned command output instead of a
real Vagrant project. Every invocation is recorded for assertions.
*/

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vag2inv::error::{CommandError, Result};
use vag2inv::VagrantRunner;

#[derive(Debug, Clone)]
enum Scripted {
    Stdout(String),
    Exit { code: i32, stderr: String },
}

/// Mock runner standing in for `vagrant`
#[derive(Clone, Default)]
pub struct MockVagrant {
    script: Arc<Mutex<HashMap<Vec<String>, Scripted>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

impl MockVagrant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `vagrant <args>` with `stdout` and a zero exit status
    pub fn on(&self, args: &[&str], stdout: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .insert(key(args), Scripted::Stdout(stdout.into()));
        self
    }

    /// Make `vagrant <args>` exit with `code`
    pub fn fail_on(&self, args: &[&str], code: i32, stderr: impl Into<String>) -> &Self {
        self.script.lock().unwrap().insert(
            key(args),
            Scripted::Exit {
                code,
                stderr: stderr.into(),
            },
        );
        self
    }

    /// Answer `vagrant ssh <host> -c "ifconfig <ifname>"`
    pub fn on_ifconfig(&self, host: &str, ifname: &str, listing: impl Into<String>) -> &Self {
        let cmd = format!("ifconfig {}", ifname);
        self.on(&["ssh", host, "-c", &cmd], listing)
    }

    /// Every invocation so far, as space-joined argument lists
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|args| args.join(" "))
            .collect()
    }

    /// Number of invocations of a given subcommand
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|args| args.first().map(String::as_str) == Some(subcommand))
            .count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl VagrantRunner for MockVagrant {
    fn run(&self, args: &[&str]) -> Result<String> {
        let args = key(args);
        self.calls.lock().unwrap().push(args.clone());
        let command = format!("vagrant {}", args.join(" "));

        let scripted = self.script.lock().unwrap().get(&args).cloned();
        match scripted {
            Some(Scripted::Stdout(stdout)) => {
                log::debug!("📤 [MOCK] {} -> {} bytes", command, stdout.len());
                Ok(stdout)
            }
            Some(Scripted::Exit { code, stderr }) => {
                log::debug!("❌ [MOCK] {} -> exit {}", command, code);
                Err(CommandError::Failed {
                    command,
                    status: format!("exit status: {}", code),
                    stderr,
                }
                .into())
            }
            None => {
                log::warn!("⚠️ [MOCK] unscripted command: {}", command);
                Err(CommandError::Failed {
                    command,
                    status: "exit status: 1".to_string(),
                    stderr: "unscripted command".to_string(),
                }
                .into())
            }
        }
    }
}

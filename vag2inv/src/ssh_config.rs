//! `vagrant ssh-config` parsing
//!
//! The dump is a sequence of blocks separated by a blank line:
//!
//! ```text
//! Host node1
//!   HostName 127.0.0.1
//!   User vagrant
//!   Port 2222
//!   IdentityFile /home/me/proj/.vagrant/machines/node1/virtualbox/private_key
//! ```
//!
//! Each block becomes one `Host`. Unknown directives are ignored and missing
//! ones stay empty.

use crate::shape;
use tracing::{debug, trace};

/// Connection profile of one machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub address: String,
    pub port: String,
    pub user: String,
    pub key_file: String,
}

impl Host {
    /// Parses one trimmed block; repeated directives keep the last value.
    pub fn from_block(block: &str) -> Self {
        let mut host = Host::default();

        for line in block.split('\n') {
            if let Some(name) = host_header(line) {
                host.name = name.to_string();
            } else if let Some((key, value)) = directive(line) {
                match key {
                    "HostName" => host.address = value.to_string(),
                    "User" => host.user = value.to_string(),
                    "Port" => host.port = value.to_string(),
                    "IdentityFile" => host.key_file = value.to_string(),
                    _ => trace!("Ignoring directive {} in block for {:?}", key, host.name),
                }
            } else {
                trace!("Skipping ssh-config line: {:?}", line);
            }
        }

        host
    }
}

/// `Host<space>+<name>` at the very start of the line
fn host_header(line: &str) -> Option<&str> {
    line.strip_prefix("Host").and_then(shape::after_space)
}

/// `<space>+<key><space>+<value>`
fn directive(line: &str) -> Option<(&str, &str)> {
    let lead = shape::space_len(line);
    if lead == 0 {
        return None;
    }
    let (key, rest) = shape::leading_token(&line[lead..])?;
    let value = shape::after_space(rest)?;
    Some((key, value))
}

/// Parses a whole ssh-config dump, keeping source order
pub fn parse(dump: &str) -> Vec<Host> {
    let normalized = dump.replace('\r', "");

    let hosts: Vec<Host> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(Host::from_block)
        .collect();

    debug!("Parsed {} host entries from ssh-config", hosts.len());
    hosts
}

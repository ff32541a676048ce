//! Inventory line building and document rendering
//!
//! Each host becomes one line carrying both the pre-2.0 `ansible_ssh_*` and
//! the current `ansible_*` variable names, so old and new Ansible releases
//! read the same file.

use crate::config::RunConfig;
use crate::discovery::{self, LOOPBACK_SENTINEL};
use crate::error::Result;
use crate::execution::VagrantRunner;
use crate::ssh_config::Host;
use std::ffi::OsStr;
use tracing::debug;

pub const GENERATOR: &str = "vag2inv";
pub const HOMEPAGE: &str = "https://github.com/William-Yeh/vag2inv";

/// Password used for guest-to-guest access in VM-resident mode
pub const VM_PASSWORD: &str = "vagrant";

const MACHINES_MARKER: &str = "/.vagrant/machines/";
const KEY_SUFFIX: &str = "/private_key";

/// How a line authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Password(String),
    PrivateKey(String),
}

impl Credential {
    fn assignment(&self) -> String {
        match self {
            Credential::Password(pass) => format!("ansible_ssh_pass={}", pass),
            Credential::PrivateKey(path) => format!("ansible_ssh_private_key_file={}", path),
        }
    }
}

/// Formats one inventory line; fields are emitted as-is, even when empty.
pub fn format_line(host: &Host, credential: &Credential) -> String {
    format!(
        "{} ansible_ssh_host={} ansible_host={} ansible_ssh_port={} ansible_port={} ansible_ssh_user={} ansible_user={} {}",
        host.name,
        host.address,
        host.address,
        host.port,
        host.port,
        host.user,
        host.user,
        credential.assignment()
    )
}

/// Moves a Vagrant-managed key under `prefix`.
///
/// Keys shaped like `<dir>/.vagrant/machines/<...>/private_key` keep their
/// `.vagrant/...` part and get `prefix` in front of it; any other path is
/// returned unchanged.
pub fn rewrite_key_path(key_file: &str, prefix: &str) -> String {
    match vagrant_key_suffix(key_file) {
        Some(suffix) => join_clean(prefix, suffix),
        None => key_file.to_string(),
    }
}

/// The `.vagrant/machines/.../private_key` tail, taken at the last marker
/// that leaves a non-empty leading directory and machine subpath.
fn vagrant_key_suffix(path: &str) -> Option<&str> {
    if path.contains('\n') || !path.ends_with(KEY_SUFFIX) {
        return None;
    }
    // markers may overlap on their shared '/', so every position is a candidate
    let bytes = path.as_bytes();
    (1..path.len())
        .rev()
        .filter(|&idx| bytes[idx..].starts_with(MACHINES_MARKER.as_bytes()))
        .find(|&idx| path.len() >= idx + MACHINES_MARKER.len() + 1 + KEY_SUFFIX.len())
        .map(|idx| &path[idx + 1..])
}

/// Slash-joins `prefix` and `suffix`, then normalises the result lexically.
fn join_clean(prefix: &str, suffix: &str) -> String {
    let joined = [prefix, suffix]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    clean_path(&joined)
}

fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    match (rooted, parts.is_empty()) {
        (true, _) => format!("/{}", parts.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => parts.join("/"),
    }
}

/// Turns hosts into inventory lines according to the run configuration
pub struct LineBuilder<'a, R> {
    runner: &'a R,
    config: &'a RunConfig,
}

impl<'a, R: VagrantRunner> LineBuilder<'a, R> {
    pub fn new(runner: &'a R, config: &'a RunConfig) -> Self {
        Self { runner, config }
    }

    pub fn line(&self, host: &Host) -> Result<String> {
        if self.config.vm_mode {
            let internal = discovery::internal_ipv4(self.runner, &host.name)?;
            let resident = with_internal_address(host, &internal);
            Ok(format_line(&resident, &Credential::Password(VM_PASSWORD.to_string())))
        } else {
            let key_file = match &self.config.key_prefix {
                Some(prefix) => rewrite_key_path(&host.key_file, prefix),
                None => host.key_file.clone(),
            };
            debug!("Key file for {}: {}", host.name, key_file);
            Ok(format_line(host, &Credential::PrivateKey(key_file)))
        }
    }
}

/// Points `host` at its internal address on port 22, unless discovery
/// returned the sentinel.
pub fn with_internal_address(host: &Host, internal: &str) -> Host {
    let mut resident = host.clone();
    if internal != LOOPBACK_SENTINEL {
        resident.address = internal.to_string();
        resident.port = "22".to_string();
    }
    resident
}

/// A complete inventory, ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub lines: Vec<String>,
}

impl Inventory {
    /// Comment block naming the generator, the invocation and the homepage
    pub fn header(cmdline: &str) -> String {
        format!(
            "# Generated by {}\n# Cmdline: {}\n# @see {}\n\n",
            GENERATOR, cmdline, HOMEPAGE
        )
    }

    /// Space-joined invocation for the header; non-UTF-8 bytes are replaced.
    pub fn cmdline<I, S>(args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Header followed by every line, each trailed by a blank line
    pub fn render(&self, cmdline: &str) -> String {
        let mut out = Self::header(cmdline);
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::scripted::ScriptedRunner;

    fn node1() -> Host {
        Host {
            name: "node1".into(),
            address: "127.0.0.1".into(),
            port: "2222".into(),
            user: "vagrant".into(),
            key_file: "/a/.vagrant/machines/node1/default/private_key".into(),
        }
    }

    fn normal(prefix: Option<&str>) -> RunConfig {
        RunConfig {
            vm_mode: false,
            key_prefix: prefix.map(str::to_string),
        }
    }

    fn vm() -> RunConfig {
        RunConfig {
            vm_mode: true,
            key_prefix: None,
        }
    }

    #[test]
    fn test_normal_mode_line() {
        let runner = ScriptedRunner::new();
        let config = normal(None);
        let line = LineBuilder::new(&runner, &config).line(&node1()).unwrap();
        assert_eq!(
            line,
            "node1 ansible_ssh_host=127.0.0.1 ansible_host=127.0.0.1 ansible_ssh_port=2222 ansible_port=2222 ansible_ssh_user=vagrant ansible_user=vagrant ansible_ssh_private_key_file=/a/.vagrant/machines/node1/default/private_key"
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_prefix_rewrite() {
        let runner = ScriptedRunner::new();
        let config = normal(Some("/custom"));
        let line = LineBuilder::new(&runner, &config).line(&node1()).unwrap();
        assert!(line.ends_with(
            " ansible_ssh_private_key_file=/custom/.vagrant/machines/node1/default/private_key"
        ));
    }

    #[test]
    fn test_rewrite_key_path_shapes() {
        let key = "/home/me/proj/.vagrant/machines/web/virtualbox/private_key";
        assert_eq!(
            rewrite_key_path(key, "/vagrant/"),
            "/vagrant/.vagrant/machines/web/virtualbox/private_key"
        );
        assert_eq!(
            rewrite_key_path(key, "relative/dir"),
            "relative/dir/.vagrant/machines/web/virtualbox/private_key"
        );
        assert_eq!(
            rewrite_key_path(key, ""),
            ".vagrant/machines/web/virtualbox/private_key"
        );
        // nested projects: the innermost .vagrant wins
        assert_eq!(
            rewrite_key_path("/x/.vagrant/machines/a/y/.vagrant/machines/b/p/private_key", "/c"),
            "/c/.vagrant/machines/b/p/private_key"
        );
        // markers sharing a slash
        assert_eq!(
            rewrite_key_path("//.vagrant/machines/.vagrant/machines/private_key", "/c"),
            "/c/.vagrant/machines/.vagrant/machines/private_key"
        );
        assert_eq!(
            rewrite_key_path("/aprivate_key/.vagrant/machines/.vagrant/machines//private_key", "/c"),
            "/c/.vagrant/machines/.vagrant/machines/private_key"
        );
    }

    #[test]
    fn test_cmdline_with_invalid_utf8() {
        assert_eq!(Inventory::cmdline(["vag2inv", "-f", "hosts"]), "vag2inv -f hosts");

        #[cfg(unix)]
        {
            use std::ffi::OsString;
            use std::os::unix::ffi::OsStringExt;

            let args = vec![
                OsString::from("vag2inv"),
                OsString::from_vec(b"hosts\xFF".to_vec()),
            ];
            let cmdline = Inventory::cmdline(args);
            assert_eq!(cmdline, "vag2inv hosts\u{FFFD}");
            assert!(Inventory::header(&cmdline).contains("# Cmdline: vag2inv hosts\u{FFFD}\n"));
        }
    }

    #[test]
    fn test_unmatched_key_path_is_untouched() {
        for key in [
            "/home/me/.ssh/id_rsa",
            "/.vagrant/machines/web/virtualbox/private_key",
            "/a/.vagrant/machines//private_key",
            "/a/.vagrant/machines/web/virtualbox/private_key.pub",
            "/a/xvagrant/machines/web/virtualbox/private_key",
            "",
        ] {
            assert_eq!(rewrite_key_path(key, "/custom"), key);
        }
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/a//b/./c/../d"), "/a/b/d");
        assert_eq!(clean_path("/../a"), "/a");
        assert_eq!(clean_path("../a/../../b"), "../../b");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path(""), ".");
    }

    #[test]
    fn test_vm_mode_with_discovered_address() {
        let runner = ScriptedRunner::new().respond(
            "ssh node1 -c ifconfig enp0s3",
            "          inet addr:10.0.2.15  Bcast:10.0.2.255  Mask:255.255.255.0\n",
        );
        let config = vm();
        let line = LineBuilder::new(&runner, &config).line(&node1()).unwrap();
        assert_eq!(
            line,
            "node1 ansible_ssh_host=10.0.2.15 ansible_host=10.0.2.15 ansible_ssh_port=22 ansible_port=22 ansible_ssh_user=vagrant ansible_user=vagrant ansible_ssh_pass=vagrant"
        );
    }

    #[test]
    fn test_vm_mode_with_sentinel_keeps_forwarded_endpoint() {
        let mut host = node1();
        host.address = "192.168.121.40".into();
        let runner = ScriptedRunner::new().respond("ssh node1 -c ifconfig enp0s3", "no address here\n");
        let config = vm();
        let line = LineBuilder::new(&runner, &config).line(&host).unwrap();
        assert!(line.starts_with(
            "node1 ansible_ssh_host=192.168.121.40 ansible_host=192.168.121.40 ansible_ssh_port=2222 ansible_port=2222 "
        ));
        assert!(line.ends_with(" ansible_ssh_pass=vagrant"));
    }

    #[test]
    fn test_vm_mode_ignores_prefix() {
        let runner = ScriptedRunner::new().respond("ssh node1 -c ifconfig enp0s3", "");
        let config = RunConfig {
            vm_mode: true,
            key_prefix: Some("/custom".into()),
        };
        let line = LineBuilder::new(&runner, &config).line(&node1()).unwrap();
        assert!(!line.contains("private_key"));
    }

    #[test]
    fn test_empty_fields_are_emitted() {
        let host = Host {
            name: "bare".into(),
            ..Host::default()
        };
        let line = format_line(&host, &Credential::PrivateKey(String::new()));
        assert_eq!(
            line,
            "bare ansible_ssh_host= ansible_host= ansible_ssh_port= ansible_port= ansible_ssh_user= ansible_user= ansible_ssh_private_key_file="
        );
    }

    #[test]
    fn test_building_twice_is_identical() {
        let runner = ScriptedRunner::new();
        let config = normal(Some("/custom"));
        let builder = LineBuilder::new(&runner, &config);
        let host = node1();
        assert_eq!(builder.line(&host).unwrap(), builder.line(&host).unwrap());
    }

    #[test]
    fn test_render() {
        let inventory = Inventory {
            lines: vec!["a ansible_host=x".into(), "b ansible_host=y".into()],
        };
        assert_eq!(
            inventory.render("vag2inv --force hosts"),
            "# Generated by vag2inv\n# Cmdline: vag2inv --force hosts\n# @see https://github.com/William-Yeh/vag2inv\n\n\
             a ansible_host=x\n\nb ansible_host=y\n\n"
        );
    }
}

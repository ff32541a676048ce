/*!
Canned Vagrant output

Builders producing text shaped like real `vagrant status`, `vagrant ssh-config`
and `ifconfig` output, so tests describe machines instead of pasting blobs.
*/

use std::path::Path;

/// Builds `vagrant status` output
#[derive(Debug, Clone)]
pub struct StatusBuilder {
    provider: String,
    machines: Vec<(String, String)>,
}

impl Default for StatusBuilder {
    fn default() -> Self {
        Self {
            provider: "virtualbox".to_string(),
            machines: Vec::new(),
        }
    }
}

impl StatusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider: &str) -> Self {
        self.provider = provider.to_string();
        self
    }

    pub fn machine(mut self, name: &str, state: &str) -> Self {
        self.machines.push((name.to_string(), state.to_string()));
        self
    }

    pub fn running(self, name: &str) -> Self {
        self.machine(name, "running")
    }

    pub fn build(&self) -> String {
        let mut out = String::from("Current machine states:\n\n");
        for (name, state) in &self.machines {
            out.push_str(&format!("{:<25} {} ({})\n", name, state, self.provider));
        }
        out.push('\n');
        if self.machines.len() > 1 {
            out.push_str(
                "This environment represents multiple VMs. The VMs are all listed\n\
                 above with their current state. For more information about a specific\n\
                 VM, run `vagrant status NAME`.\n",
            );
        } else {
            out.push_str(
                "The VM is running. To stop this VM, you can run `vagrant halt` to\n\
                 shut it down forcefully, or you can run `vagrant suspend` to simply\n\
                 suspend the virtual machine.\n",
            );
        }
        out
    }
}

/// One `Host` block of `vagrant ssh-config`
#[derive(Debug, Clone)]
pub struct SshHost {
    pub name: String,
    pub address: String,
    pub port: u16,
    pub user: String,
    pub key_file: String,
}

impl SshHost {
    /// A machine forwarded on localhost, keyed under `project/.vagrant`
    pub fn forwarded(name: &str, port: u16, project: &Path) -> Self {
        Self {
            name: name.to_string(),
            address: "127.0.0.1".to_string(),
            port,
            user: "vagrant".to_string(),
            key_file: project
                .join(".vagrant/machines")
                .join(name)
                .join("virtualbox/private_key")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

/// Builds `vagrant ssh-config` output
#[derive(Debug, Clone, Default)]
pub struct SshConfigBuilder {
    hosts: Vec<SshHost>,
    crlf: bool,
}

impl SshConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: SshHost) -> Self {
        self.hosts.push(host);
        self
    }

    /// Emit Windows line endings
    pub fn crlf(mut self) -> Self {
        self.crlf = true;
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        for host in &self.hosts {
            out.push_str(&format!("Host {}\n", host.name));
            out.push_str(&format!("  HostName {}\n", host.address));
            out.push_str(&format!("  User {}\n", host.user));
            out.push_str(&format!("  Port {}\n", host.port));
            out.push_str("  UserKnownHostsFile /dev/null\n");
            out.push_str("  StrictHostKeyChecking no\n");
            out.push_str("  PasswordAuthentication no\n");
            out.push_str(&format!("  IdentityFile {}\n", host.key_file));
            out.push_str("  IdentitiesOnly yes\n");
            out.push_str("  LogLevel FATAL\n");
            out.push('\n');
        }
        if self.crlf {
            out.replace('\n', "\r\n")
        } else {
            out
        }
    }
}

/// Classic net-tools `ifconfig <ifname>` listing carrying `ip`
pub fn ifconfig_output(ifname: &str, ip: &str) -> String {
    format!(
        "{:<10}Link encap:Ethernet  HWaddr 08:00:27:8a:5c:71\n          \
         inet addr:{}  Bcast:10.0.2.255  Mask:255.255.255.0\n          \
         inet6 addr: fe80::a00:27ff:fe8a:5c71/64 Scope:Link\n          \
         UP BROADCAST RUNNING MULTICAST  MTU:1500  Metric:1\n          \
         RX packets:1204 errors:0 dropped:0 overruns:0 frame:0\n\n",
        ifname, ip
    )
}

/// `ifconfig <ifname>` listing of an interface without an IPv4 address
pub fn ifconfig_without_ipv4(ifname: &str) -> String {
    format!(
        "{:<10}Link encap:Ethernet  HWaddr 08:00:27:8a:5c:71\n          \
         UP BROADCAST MULTICAST  MTU:1500  Metric:1\n\n",
        ifname
    )
}

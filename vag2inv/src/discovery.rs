//! Guest-internal address discovery for VM-resident inventories
//!
//! When the Ansible control machine lives inside one of the boxes, the
//! forwarded `127.0.0.1:2222` style endpoints are useless; the inventory needs
//! each guest's address on the internal network instead. It is read from
//! `ifconfig` run inside the guest through `vagrant ssh`.

use crate::error::{InventoryError, Result};
use crate::execution::VagrantRunner;
use crate::shape;
use tracing::{debug, info, warn};

/// Interfaces tried in order; systemd-style predictable name first
pub const INTERFACE_PRIORITY: &[&str] = &["enp0s3", "eth0"];

/// Returned when a listing succeeded but carried no IPv4 address
pub const LOOPBACK_SENTINEL: &str = "127.0.0.1";

/// Extracts the address from `<space>+inet addr:<ip><space><more>`.
pub fn inet_addr(line: &str) -> Option<&str> {
    let lead = shape::space_len(line);
    if lead == 0 {
        return None;
    }
    let rest = line[lead..].strip_prefix("inet addr:")?;
    let (ip, tail) = shape::leading_token(rest)?;
    // one whitespace character, then at least one more of anything
    let mut chars = tail.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some(n)) if shape::is_space(c) && n != '\n' => Some(ip),
        _ => None,
    }
}

/// First IPv4 address in an `ifconfig` listing, or the loopback sentinel
pub fn first_inet_addr(listing: &str) -> &str {
    listing
        .split('\n')
        .find_map(inet_addr)
        .unwrap_or(LOOPBACK_SENTINEL)
}

/// Queries the internal IPv4 address of `host` via `vagrant ssh -c ifconfig`.
///
/// The first interface whose listing command succeeds is used, whether or not
/// it carries an address. Fails only when every listing command fails.
pub fn internal_ipv4<R: VagrantRunner>(runner: &R, host: &str) -> Result<String> {
    for ifname in INTERFACE_PRIORITY {
        let listing_cmd = format!("ifconfig {}", ifname);
        match runner.run(&["ssh", host, "-c", &listing_cmd]) {
            Ok(listing) => {
                let addr = first_inet_addr(&listing);
                if addr == LOOPBACK_SENTINEL {
                    warn!("No IPv4 address on {} of {}", ifname, host);
                } else {
                    info!("Discovered {} on {} of {}", addr, ifname, host);
                }
                return Ok(addr.to_string());
            }
            Err(e) => debug!("Listing {} on {} failed: {}", ifname, host, e),
        }
    }

    Err(InventoryError::NoInternalAddress {
        host: host.to_string(),
        tried: INTERFACE_PRIORITY.join(", "),
    })
}

//! Echo-request probe backed by the system `ping` utility.
//!
//! Shelling out avoids raw sockets, so the active pass works without root.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use hostscan_common::scanning::ReachabilityProbe;
use tokio::process::Command;
use tracing::debug;

pub struct SystemPing;

#[async_trait]
impl ReachabilityProbe for SystemPing {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> bool {
        let status = Command::new("ping")
            .args(ping_args(addr, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("ping {addr} could not run: {e}");
                false
            }
        }
    }
}

/// Arguments for a single echo request bounded by `timeout`.
fn ping_args(addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
    if cfg!(target_os = "windows") {
        vec![
            "-n".into(),
            "1".into(),
            "-w".into(),
            timeout.as_millis().to_string(),
            addr.to_string(),
        ]
    } else {
        vec![
            "-c".into(),
            "1".into(),
            "-W".into(),
            wait_secs(timeout).to_string(),
            addr.to_string(),
        ]
    }
}

/// Unix `ping -W` takes whole seconds; round to the nearest and never go below one.
fn wait_secs(timeout: Duration) -> u64 {
    let millis: u64 = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    (millis.saturating_add(500) / 1000).max(1)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

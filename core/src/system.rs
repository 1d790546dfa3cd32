//! Access to the operating system's neighbor (ARP) cache.

use async_trait::async_trait;
use hostscan_common::scanning::NeighborSource;
use tokio::process::Command;
use tracing::debug;

/// Reads the neighbor cache through the platform's own tooling.
///
/// Linux: `ip neigh show`, falling back to `arp -an` when it prints nothing.
/// Windows: `arp -a`.
pub struct SystemNeighborTable;

#[async_trait]
impl NeighborSource for SystemNeighborTable {
    async fn read_table(&self) -> String {
        #[cfg(target_os = "windows")]
        {
            run_command("arp", &["-a"]).await
        }
        #[cfg(not(target_os = "windows"))]
        {
            let neigh: String = run_command("ip", &["neigh", "show"]).await;
            if !neigh.trim().is_empty() {
                return neigh;
            }
            run_command("arp", &["-an"]).await
        }
    }
}

/// Captures stdout of `program`, or an empty string if it cannot be run.
async fn run_command(program: &str, args: &[&str]) -> String {
    match Command::new(program).args(args).output().await {
        Ok(output) => {
            if !output.stderr.is_empty() {
                debug!(
                    "{program} stderr: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            String::from_utf8_lossy(&output.stdout).into_owned()
        }
        Err(e) => {
            debug!("{program} unavailable: {e}");
            String::new()
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

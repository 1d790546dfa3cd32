//! Reverse-DNS enrichment.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostscan_common::scanning::ReverseResolver;
use tracing::{debug, warn};

use crate::scanner;

/// PTR lookups through the system resolver.
///
/// `getnameinfo` blocks, so each lookup runs on the blocking pool and is
/// abandoned once `timeout` elapses.
pub struct ReverseDns {
    timeout: Duration,
}

impl ReverseDns {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ReverseResolver for ReverseDns {
    async fn lookup(&self, addr: Ipv4Addr) -> Option<String> {
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&IpAddr::V4(addr)));

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(hostname))) => Some(hostname),
            Ok(Ok(Err(e))) => {
                debug!("No PTR record for {addr}: {e}");
                None
            }
            Ok(Err(e)) => {
                warn!("DNS worker for {addr} failed: {e}");
                None
            }
            Err(_elapsed) => {
                debug!("Reverse lookup for {addr} timed out");
                None
            }
        }
    }
}

/// Looks up every address concurrently and keeps only the successful answers.
pub async fn resolve_all(
    addrs: Vec<Ipv4Addr>,
    resolver: Arc<dyn ReverseResolver>,
    max_concurrency: usize,
) -> HashMap<Ipv4Addr, String> {
    let answers: HashMap<Ipv4Addr, Option<String>> = scanner::fan_out(
        addrs,
        max_concurrency,
        move |addr| {
            let resolver = Arc::clone(&resolver);
            async move { resolver.lookup(addr).await }
        },
        |_| {},
    )
    .await;

    answers
        .into_iter()
        .filter_map(|(addr, name)| name.map(|name| (addr, name)))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! # Network Discovery Service
//!
//! Runs the discovery passes and reconciles their evidence into one record per host.
//!
//! 1. **Passive**: read and parse the neighbor table.
//! 2. **Active** (optional): probe every host of the configured range, then
//!    read the neighbor table a second time, since probing tends to populate it.
//! 3. **Enrichment** (optional): reverse-DNS every record.
//!
//! Configuration problems are reported before the neighbor table is even read.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use hostscan_common::config::Config;
use hostscan_common::error::DiscoveryError;
use hostscan_common::network::host::{DiscoverySource, HostRecord};
use hostscan_common::network::range::{self, Ipv4Range};
use hostscan_common::scanning::{NeighborSource, ProgressFn, ReachabilityProbe, ReverseResolver};
use hostscan_common::success;
use tracing::{debug, info};

use crate::neighbors::{self, NeighborTable};
use crate::reconcile::{self, RecordSet};
use crate::{resolver, scanner};

/// Application service for host discovery.
///
/// Collaborators are injected so the merge logic runs identically against the
/// real OS tooling and against scripted sources in tests.
pub struct DiscoveryService {
    neighbors: Box<dyn NeighborSource>,
    probe: Arc<dyn ReachabilityProbe>,
    resolver: Arc<dyn ReverseResolver>,
    progress: Option<Box<ProgressFn>>,
}

/// Final, address-ordered records plus counters describing the run.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub records: Vec<HostRecord>,
    pub report: DiscoveryReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub total: usize,
    pub from_table: usize,
    pub from_probe: usize,
    pub probed: usize,
    pub reachable: usize,
    pub named: usize,
    pub elapsed: Duration,
}

impl DiscoveryReport {
    fn tally(records: &[HostRecord], probed: usize, elapsed: Duration) -> Self {
        let from_table: usize = records
            .iter()
            .filter(|r| r.source == DiscoverySource::ResolutionTable)
            .count();

        Self {
            total: records.len(),
            from_table,
            from_probe: records.len() - from_table,
            probed,
            reachable: records.iter().filter(|r| r.reachable == Some(true)).count(),
            named: records.iter().filter(|r| r.hostname.is_some()).count(),
            elapsed,
        }
    }
}

impl DiscoveryService {
    pub fn new(
        neighbors: Box<dyn NeighborSource>,
        probe: Arc<dyn ReachabilityProbe>,
        resolver: Arc<dyn ReverseResolver>,
    ) -> Self {
        Self {
            neighbors,
            probe,
            resolver,
            progress: None,
        }
    }

    /// Registers a callback receiving `(probed, total)` during the active pass.
    pub fn with_progress(mut self, progress: Box<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Executes a full discovery run.
    ///
    /// `observed_at` is stamped on every record so one run shares one timestamp.
    pub async fn perform_discovery(
        &self,
        cfg: &Config,
        observed_at: DateTime<Utc>,
    ) -> Result<Discovery, DiscoveryError> {
        let active_range: Option<Ipv4Range> = plan_active_pass(cfg)?;
        let started: Instant = Instant::now();

        let table: NeighborTable = self.read_neighbors().await;
        info!("Neighbor table lists {} IPv4 hosts", table.len());
        let mut records: RecordSet =
            reconcile::absorb(RecordSet::new(), reconcile::table_batch(&table, observed_at));

        let mut probed: usize = 0;
        if let Some(range) = active_range {
            info!(
                "Probing {} hosts from {} to {}",
                range.len(),
                range.start_addr,
                range.end_addr
            );
            let outcomes = scanner::probe_range(
                &range,
                Arc::clone(&self.probe),
                cfg,
                self.progress.as_deref(),
            )
            .await;
            probed = outcomes.len();
            let answered: usize = outcomes.values().filter(|ok| **ok).count();
            success!("{answered} of {probed} probed hosts answered");

            records = reconcile::absorb(records, reconcile::probe_batch(&outcomes, observed_at));

            let refreshed: NeighborTable = self.read_neighbors().await;
            debug!("Neighbor table lists {} IPv4 hosts after probing", refreshed.len());
            records = reconcile::absorb(records, reconcile::table_batch(&refreshed, observed_at));

            records = reconcile::apply_outcomes(records, &outcomes);
        }

        if cfg.resolve_names {
            let addrs: Vec<Ipv4Addr> = records.keys().copied().collect();
            info!("Resolving names for {} hosts", addrs.len());
            let names = resolver::resolve_all(addrs, Arc::clone(&self.resolver), cfg.max_concurrency).await;
            records = reconcile::apply_hostnames(records, &names);
        }

        let records: Vec<HostRecord> = records.into_values().collect();
        let report = DiscoveryReport::tally(&records, probed, started.elapsed());

        Ok(Discovery { records, report })
    }

    async fn read_neighbors(&self) -> NeighborTable {
        neighbors::parse_table(&self.neighbors.read_table().await)
    }
}

/// Validates everything the active pass needs, before any work starts.
fn plan_active_pass(cfg: &Config) -> Result<Option<Ipv4Range>, DiscoveryError> {
    if !cfg.active {
        if let Some(cidr) = &cfg.range {
            debug!("Ignoring range {cidr}: active probing is disabled");
        }
        return Ok(None);
    }

    let cidr: &str = cfg.range.as_deref().ok_or(DiscoveryError::MissingRange)?;
    range::host_range(cidr).map(Some)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

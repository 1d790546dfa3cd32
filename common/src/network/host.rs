use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use pnet::util::MacAddr;

/// Which kind of evidence justifies a record's existence.
///
/// Ordered by authority: a neighbor-table entry outranks a bare reachability
/// signal, so merging two sources keeps the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiscoverySource {
    ActiveProbe,
    ResolutionTable,
}

impl DiscoverySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveProbe => "active_probe",
            Self::ResolutionTable => "resolution_table",
        }
    }
}

/// One discovered IPv4 host. The address is the dedup key within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub address: Ipv4Addr,
    pub hardware_addr: Option<MacAddr>,
    pub hostname: Option<String>,
    /// `None` unless the address was probed during this run.
    pub reachable: Option<bool>,
    pub source: DiscoverySource,
    pub observed_at: DateTime<Utc>,
}

impl HostRecord {
    pub fn new(address: Ipv4Addr, source: DiscoverySource, observed_at: DateTime<Utc>) -> Self {
        Self {
            address,
            hardware_addr: None,
            hostname: None,
            reachable: None,
            source,
            observed_at,
        }
    }

    pub fn with_hardware_addr(mut self, mac: MacAddr) -> Self {
        self.hardware_addr = Some(mac);
        self
    }
}

//! # Record Reconciliation
//!
//! Pure functions that fold discovery evidence into the record set.
//!
//! Every step takes the previous [`RecordSet`] by value and returns the next
//! one, so a pass either applies completely or not at all. Precedence lives in
//! a single place, [`merge_record`]:
//!
//! * the hardware address is only ever filled in, never cleared or replaced;
//! * the discovery source only moves up, `ActiveProbe` → `ResolutionTable`;
//! * the first observation time of a record is kept.

use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use hostscan_common::network::host::{DiscoverySource, HostRecord};

use crate::neighbors::NeighborTable;

/// Records keyed by address. `Ipv4Addr` orders numerically, so iteration is already output order.
pub type RecordSet = BTreeMap<Ipv4Addr, HostRecord>;

/// Combines an existing record with newer evidence about the same address.
pub fn merge_record(existing: Option<HostRecord>, incoming: HostRecord) -> HostRecord {
    let Some(existing) = existing else {
        return incoming;
    };

    HostRecord {
        address: existing.address,
        hardware_addr: existing.hardware_addr.or(incoming.hardware_addr),
        hostname: incoming.hostname.or(existing.hostname),
        reachable: incoming.reachable.or(existing.reachable),
        source: existing.source.max(incoming.source),
        observed_at: existing.observed_at,
    }
}

/// Folds a batch of candidate records into the set, one [`merge_record`] per address.
pub fn absorb(records: RecordSet, batch: impl IntoIterator<Item = HostRecord>) -> RecordSet {
    batch.into_iter().fold(records, |mut set, incoming| {
        let merged: HostRecord = merge_record(set.remove(&incoming.address), incoming);
        set.insert(merged.address, merged);
        set
    })
}

/// Candidate records for every neighbor-table entry.
pub fn table_batch(table: &NeighborTable, observed_at: DateTime<Utc>) -> Vec<HostRecord> {
    table
        .iter()
        .map(|(addr, mac)| {
            HostRecord::new(*addr, DiscoverySource::ResolutionTable, observed_at)
                .with_hardware_addr(*mac)
        })
        .collect()
}

/// Candidate records for every address that answered a probe.
///
/// Unreachable addresses produce nothing: silence is not evidence of a host.
pub fn probe_batch(outcomes: &HashMap<Ipv4Addr, bool>, observed_at: DateTime<Utc>) -> Vec<HostRecord> {
    outcomes
        .iter()
        .filter(|(_, reachable)| **reachable)
        .map(|(addr, _)| HostRecord::new(*addr, DiscoverySource::ActiveProbe, observed_at))
        .collect()
}

/// Stamps the observed probe outcome on every record whose address was probed.
///
/// Probe outcomes never create records; records outside the probed set keep their state.
pub fn apply_outcomes(mut records: RecordSet, outcomes: &HashMap<Ipv4Addr, bool>) -> RecordSet {
    for (addr, reachable) in outcomes {
        if let Some(record) = records.get_mut(addr) {
            record.reachable = Some(*reachable);
        }
    }
    records
}

/// Attaches resolved names, ignoring answers that merely echo the address back.
pub fn apply_hostnames(mut records: RecordSet, names: &HashMap<Ipv4Addr, String>) -> RecordSet {
    for (addr, name) in names {
        let name: &str = name.trim();
        if name.is_empty() || name == addr.to_string() {
            continue;
        }
        if let Some(record) = records.get_mut(addr) {
            record.hostname = Some(name.to_string());
        }
    }
    records
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

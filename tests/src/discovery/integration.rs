use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use hostscan_common::config::Config;
use hostscan_common::error::DiscoveryError;
use hostscan_common::export::RecordSink;
use hostscan_common::network::host::{DiscoverySource, HostRecord};
use hostscan_common::scanning::ReachabilityProbe;
use hostscan_core::discovery::DiscoveryService;
use hostscan_core::export::CsvSink;
use pnet::util::MacAddr;

use super::fakes::{MapResolver, ScriptedTable, SetProbe, no_names};

fn ts() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn lan(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, last)
}

fn find(records: &[HostRecord], addr: Ipv4Addr) -> &HostRecord {
    records
        .iter()
        .find(|r| r.address == addr)
        .unwrap_or_else(|| panic!("no record for {addr}"))
}

fn active(cidr: &str) -> Config {
    Config {
        range: Some(cidr.to_string()),
        active: true,
        ..Config::default()
    }
}

const FIRST_DUMP: &str = "\
192.168.1.1 dev eth0 lladdr 00:11:22:33:44:01 REACHABLE
192.168.1.9 dev eth0  FAILED";

const SECOND_DUMP: &str = "\
192.168.1.1 dev eth0 lladdr 00:11:22:33:44:01 REACHABLE
192.168.1.5 dev eth0 lladdr 00:11:22:33:44:05 DELAY
192.168.1.200 dev eth0 lladdr 00:11:22:33:44:c8 STALE";

/// This test verifies that a passive run only reports what the neighbor table lists,
/// in numeric address order, without probing anything.
#[tokio::test]
async fn passive_run_reports_table_only() {
    let table = ScriptedTable::new(&[
        "? (10.0.0.100) at aa:bb:cc:00:00:64 on en0\n? (10.0.0.3) at aa:bb:cc:00:00:03 on en0\n? (10.0.0.20) at aa:bb:cc:00:00:14 on en0",
    ]);
    let reads = table.reads();
    let probe = Arc::new(SetProbe::new(&[]));

    let service = DiscoveryService::new(
        Box::new(table),
        Arc::clone(&probe) as Arc<dyn ReachabilityProbe>,
        Arc::new(no_names()),
    );
    let discovery = service.perform_discovery(&Config::default(), ts()).await.unwrap();

    let order: Vec<String> = discovery.records.iter().map(|r| r.address.to_string()).collect();
    assert_eq!(order, ["10.0.0.3", "10.0.0.20", "10.0.0.100"]);
    assert!(discovery.records.iter().all(|r| {
        r.source == DiscoverySource::ResolutionTable && r.reachable.is_none() && r.hardware_addr.is_some()
    }));
    assert!(probe.asked.lock().unwrap().is_empty());
    assert_eq!(reads.load(Ordering::SeqCst), 1);
    assert_eq!(discovery.report.probed, 0);
}

#[tokio::test]
async fn active_run_without_range_fails_before_any_io() {
    let table = ScriptedTable::new(&[FIRST_DUMP]);
    let reads = table.reads();
    let service = DiscoveryService::new(Box::new(table), Arc::new(SetProbe::new(&[])), Arc::new(no_names()));

    let cfg = Config {
        active: true,
        ..Config::default()
    };
    let result = service.perform_discovery(&cfg, ts()).await;

    assert_eq!(result.err(), Some(DiscoveryError::MissingRange));
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_run_reports_no_progress() {
    let calls: Arc<std::sync::atomic::AtomicUsize> = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let service = DiscoveryService::new(
        Box::new(ScriptedTable::new(&[FIRST_DUMP])),
        Arc::new(SetProbe::new(&[])),
        Arc::new(no_names()),
    )
    .with_progress(Box::new(move |_: usize, _: usize| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let cfg = Config {
        active: true,
        ..Config::default()
    };
    let result = service.perform_discovery(&cfg, ts()).await;

    assert_eq!(result.err(), Some(DiscoveryError::MissingRange));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_range_fails_before_any_io() {
    let table = ScriptedTable::new(&[FIRST_DUMP]);
    let reads = table.reads();
    let service = DiscoveryService::new(Box::new(table), Arc::new(SetProbe::new(&[])), Arc::new(no_names()));

    let result = service.perform_discovery(&active("10.0.0.0/19"), ts()).await;

    assert_eq!(
        result.err(),
        Some(DiscoveryError::RangeTooLarge { count: 8190, limit: 4096 })
    );
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

/// Probing populates the neighbor table, so the second read upgrades probe-only
/// records and may surface hosts outside the probed range.
#[tokio::test]
async fn active_run_merges_both_table_reads() {
    let table = ScriptedTable::new(&[FIRST_DUMP, SECOND_DUMP]);
    let reads = table.reads();
    let probe = Arc::new(SetProbe::new(&[lan(2), lan(5)]));

    let service = DiscoveryService::new(
        Box::new(table),
        Arc::clone(&probe) as Arc<dyn ReachabilityProbe>,
        Arc::new(no_names()),
    );
    let discovery = service.perform_discovery(&active("192.168.1.0/29"), ts()).await.unwrap();
    let records = &discovery.records;

    assert_eq!(reads.load(Ordering::SeqCst), 2);

    let mut asked = probe.asked.lock().unwrap().clone();
    asked.sort();
    assert_eq!(asked, (1..=6).map(lan).collect::<Vec<_>>());

    let addrs: Vec<Ipv4Addr> = records.iter().map(|r| r.address).collect();
    assert_eq!(addrs, [lan(1), lan(2), lan(5), lan(200)]);

    let gateway = find(records, lan(1));
    assert_eq!(gateway.source, DiscoverySource::ResolutionTable);
    assert_eq!(gateway.reachable, Some(false));

    let probe_only = find(records, lan(2));
    assert_eq!(probe_only.source, DiscoverySource::ActiveProbe);
    assert_eq!(probe_only.hardware_addr, None);
    assert_eq!(probe_only.reachable, Some(true));

    let upgraded = find(records, lan(5));
    assert_eq!(upgraded.source, DiscoverySource::ResolutionTable);
    assert_eq!(upgraded.hardware_addr, Some(MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x05)));
    assert_eq!(upgraded.reachable, Some(true));

    let outside = find(records, lan(200));
    assert_eq!(outside.source, DiscoverySource::ResolutionTable);
    assert_eq!(outside.reachable, None);

    assert_eq!(discovery.report.total, 4);
    assert_eq!(discovery.report.from_table, 3);
    assert_eq!(discovery.report.from_probe, 1);
    assert_eq!(discovery.report.probed, 6);
    assert_eq!(discovery.report.reachable, 2);
    assert!(records.iter().all(|r| r.observed_at == ts()));
}

#[tokio::test]
async fn table_record_survives_an_empty_second_read() {
    let table = ScriptedTable::new(&[FIRST_DUMP, ""]);
    let service = DiscoveryService::new(
        Box::new(table),
        Arc::new(SetProbe::new(&[lan(1)])),
        Arc::new(no_names()),
    );

    let discovery = service.perform_discovery(&active("192.168.1.0/30"), ts()).await.unwrap();

    assert_eq!(discovery.records.len(), 1);
    let gateway = &discovery.records[0];
    assert_eq!(gateway.source, DiscoverySource::ResolutionTable);
    assert_eq!(gateway.hardware_addr, Some(MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x01)));
    assert_eq!(gateway.reachable, Some(true));
}

#[tokio::test]
async fn range_is_ignored_when_not_active() {
    let probe = Arc::new(SetProbe::new(&[lan(2)]));
    let service = DiscoveryService::new(
        Box::new(ScriptedTable::new(&[FIRST_DUMP])),
        Arc::clone(&probe) as Arc<dyn ReachabilityProbe>,
        Arc::new(no_names()),
    );

    let cfg = Config {
        range: Some("192.168.1.0/29".to_string()),
        ..Config::default()
    };
    let discovery = service.perform_discovery(&cfg, ts()).await.unwrap();

    assert_eq!(discovery.records.len(), 1);
    assert!(probe.asked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn resolution_keeps_only_real_names() {
    let dump = "\
192.168.1.1 dev eth0 lladdr 00:11:22:33:44:01 REACHABLE
192.168.1.2 dev eth0 lladdr 00:11:22:33:44:02 REACHABLE
192.168.1.3 dev eth0 lladdr 00:11:22:33:44:03 REACHABLE";
    let resolver = MapResolver(HashMap::from([
        (lan(1), "gateway.lan".to_string()),
        (lan(2), "192.168.1.2".to_string()),
        (lan(3), "   ".to_string()),
    ]));
    let service = DiscoveryService::new(
        Box::new(ScriptedTable::new(&[dump])),
        Arc::new(SetProbe::new(&[])),
        Arc::new(resolver),
    );

    let cfg = Config {
        resolve_names: true,
        ..Config::default()
    };
    let discovery = service.perform_discovery(&cfg, ts()).await.unwrap();

    assert_eq!(find(&discovery.records, lan(1)).hostname.as_deref(), Some("gateway.lan"));
    assert_eq!(find(&discovery.records, lan(2)).hostname, None);
    assert_eq!(find(&discovery.records, lan(3)).hostname, None);
    assert_eq!(discovery.report.named, 1);
}

#[tokio::test]
async fn progress_is_reported_for_every_probe() {
    let seen: Arc<std::sync::Mutex<Vec<(usize, usize)>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let service = DiscoveryService::new(
        Box::new(ScriptedTable::new(&[""])),
        Arc::new(SetProbe::new(&[])),
        Arc::new(no_names()),
    )
    .with_progress(Box::new(move |done: usize, total: usize| sink.lock().unwrap().push((done, total))));

    let discovery = service.perform_discovery(&active("10.9.8.0/29"), ts()).await.unwrap();

    assert!(discovery.records.is_empty());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 6);
    assert_eq!(seen.last(), Some(&(6, 6)));
}

#[tokio::test]
async fn discovered_records_export_as_csv() -> anyhow::Result<()> {
    let service = DiscoveryService::new(
        Box::new(ScriptedTable::new(&[FIRST_DUMP, SECOND_DUMP])),
        Arc::new(SetProbe::new(&[lan(2)])),
        Arc::new(no_names()),
    );
    let discovery = service.perform_discovery(&active("192.168.1.0/30"), ts()).await?;

    let mut sink = CsvSink::new(Vec::new());
    sink.write_records(&discovery.records)?;
    let text = String::from_utf8(sink.into_inner()?)?;

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "ip,mac,hostname,reachable,seen_via,timestamp",
            "192.168.1.1,00:11:22:33:44:01,,0,resolution_table,2023-11-14T22:13:20Z",
            "192.168.1.2,,,1,active_probe,2023-11-14T22:13:20Z",
            "192.168.1.5,00:11:22:33:44:05,,,resolution_table,2023-11-14T22:13:20Z",
            "192.168.1.200,00:11:22:33:44:c8,,,resolution_table,2023-11-14T22:13:20Z",
        ]
    );
    Ok(())
}

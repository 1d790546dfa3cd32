use std::collections::{HashMap, HashSet, VecDeque};
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hostscan_common::scanning::{NeighborSource, ReachabilityProbe, ReverseResolver};

/// Hands out one scripted table dump per read, repeating the last one once exhausted.
pub struct ScriptedTable {
    dumps: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    reads: Arc<AtomicUsize>,
}

impl ScriptedTable {
    pub fn new(dumps: &[&str]) -> Self {
        Self {
            dumps: Mutex::new(dumps.iter().map(|d| d.to_string()).collect()),
            last: Mutex::new(String::new()),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Read counter that stays valid after the table is moved into a service.
    pub fn reads(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl NeighborSource for ScriptedTable {
    async fn read_table(&self) -> String {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.dumps.lock().unwrap().pop_front() {
            *last = next;
        }
        last.clone()
    }
}

/// Answers only for the listed addresses and remembers what it was asked.
pub struct SetProbe {
    alive: HashSet<Ipv4Addr>,
    pub asked: Mutex<Vec<Ipv4Addr>>,
}

impl SetProbe {
    pub fn new(alive: &[Ipv4Addr]) -> Self {
        Self {
            alive: alive.iter().copied().collect(),
            asked: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ReachabilityProbe for SetProbe {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> bool {
        self.asked.lock().unwrap().push(addr);
        self.alive.contains(&addr)
    }
}

pub struct MapResolver(pub HashMap<Ipv4Addr, String>);

#[async_trait]
impl ReverseResolver for MapResolver {
    async fn lookup(&self, addr: Ipv4Addr) -> Option<String> {
        self.0.get(&addr).cloned()
    }
}

pub fn no_names() -> MapResolver {
    MapResolver(HashMap::new())
}

//! Concrete reachability probes.

pub mod ping;
pub mod tcp;

use std::sync::Arc;

use hostscan_common::config::{Config, ProbeMethod};
use hostscan_common::scanning::ReachabilityProbe;

use self::{ping::SystemPing, tcp::TcpConnectProbe};

/// Picks the probe implementation requested by the configuration.
pub fn probe_for(cfg: &Config) -> Arc<dyn ReachabilityProbe> {
    match cfg.probe_method {
        ProbeMethod::Icmp => Arc::new(SystemPing),
        ProbeMethod::Tcp => Arc::new(TcpConnectProbe::new(cfg.tcp_port)),
    }
}

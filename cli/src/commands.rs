pub mod discover;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use hostscan_common::config::{self, Config, ProbeMethod};
use hostscan_core::export::ExportFormat;
use tracing::level_filters::LevelFilter;

/// Where the encoded records go.
#[derive(Debug, Clone)]
pub struct Output {
    /// `None` writes to stdout.
    pub path: Option<PathBuf>,
    pub format: ExportFormat,
}

#[derive(Parser)]
#[command(name = "hostscan")]
#[command(about = "Inventory the IPv4 hosts of the local network segment.")]
pub struct CommandLine {
    /// CIDR block to probe in active mode (e.g. 192.168.1.0/24, /8 to /30)
    #[arg(long, alias = "cidr", value_name = "CIDR")]
    pub subnet: Option<String>,

    /// Probe every host of --subnet in addition to reading the neighbor table
    #[arg(short, long)]
    pub active: bool,

    /// Resolve hostnames through reverse DNS
    #[arg(short, long, alias = "dns")]
    pub resolve: bool,

    /// Per-probe timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 750)]
    pub timeout_ms: u64,

    /// Per-lookup reverse DNS timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub dns_timeout_ms: u64,

    /// Maximum number of probes or lookups in flight
    #[arg(short, long, alias = "workers", value_name = "N", default_value_t = config::DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Reachability test used in active mode: icmp or tcp
    #[arg(short, long, default_value = "icmp")]
    pub method: ProbeMethod,

    /// Port for the tcp probe method
    #[arg(short, long, default_value_t = config::DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Output encoding: csv or jsonl
    #[arg(short, long, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file, '-' for stdout
    #[arg(short, long, value_name = "PATH", default_value = "inventory.csv")]
    pub out: String,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            range: self.subnet.clone(),
            active: self.active,
            resolve_names: self.resolve,
            probe_timeout: Duration::from_millis(self.timeout_ms),
            dns_timeout: Duration::from_millis(self.dns_timeout_ms),
            max_concurrency: self.concurrency.max(1),
            probe_method: self.method,
            tcp_port: self.port,
        }
    }

    pub fn output(&self) -> Output {
        let path = match self.out.as_str() {
            "-" => None,
            path => Some(PathBuf::from(path)),
        };
        Output {
            path,
            format: self.format,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::WARN,
            (false, 0) => LevelFilter::INFO,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
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

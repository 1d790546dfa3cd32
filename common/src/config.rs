use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(750);
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;
pub const DEFAULT_TCP_PORT: u16 = 443;

/// How the active pass decides whether an address answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// Echo request through the system `ping` utility.
    #[default]
    Icmp,
    /// TCP connection attempt; an accepted or refused connection both count as alive.
    Tcp,
}

impl FromStr for ProbeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icmp" | "ping" => Ok(Self::Icmp),
            "tcp" => Ok(Self::Tcp),
            other => Err(format!("unknown probe method: {other} (expected icmp or tcp)")),
        }
    }
}

/// Run-wide settings handed to the discovery engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// CIDR block probed during the active pass.
    pub range: Option<String>,
    /// Enables the active probing pass.
    pub active: bool,
    /// Enables reverse-DNS enrichment.
    pub resolve_names: bool,
    pub probe_timeout: Duration,
    pub dns_timeout: Duration,
    /// Upper bound on in-flight probes and lookups.
    pub max_concurrency: usize,
    pub probe_method: ProbeMethod,
    /// Port used when `probe_method` is [`ProbeMethod::Tcp`].
    pub tcp_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: None,
            active: false,
            resolve_names: false,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            probe_method: ProbeMethod::default(),
            tcp_port: DEFAULT_TCP_PORT,
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

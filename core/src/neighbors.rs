//! # Neighbor Table Parser
//!
//! Turns the loosely structured output of `arp -a`, `arp -an` or `ip neigh`
//! into an address → hardware address mapping.
//!
//! Each line is offered to an ordered list of [`LineFormat`] matchers. The
//! first one that extracts a valid IPv4 address and a valid MAC wins; lines
//! nobody recognizes (headers, incomplete entries, IPv6 neighbors) are skipped.
//! Parsing never fails, it only yields fewer entries.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use hostscan_common::network::{mac, range};
use pnet::util::MacAddr;
use tracing::debug;

pub type NeighborTable = BTreeMap<Ipv4Addr, MacAddr>;

/// A platform layout a neighbor-table line may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `192.168.1.5   aa-bb-cc-dd-ee-ff   dynamic` (Windows `arp -a`).
    TableRow,
    /// `? (192.168.1.9) at 11:22:33:44:55:66 on eth0` (BSD/macOS `arp -an`).
    AtPhrase,
    /// `192.168.1.1 dev eth0 lladdr 11:22:33:44:55:66 REACHABLE` (Linux `ip neigh`).
    LinkLayer,
}

impl LineFormat {
    /// Matchers in the order they are tried.
    pub const ALL: [LineFormat; 3] = [Self::TableRow, Self::AtPhrase, Self::LinkLayer];

    pub fn extract(self, line: &str) -> Option<(Ipv4Addr, MacAddr)> {
        match self {
            Self::TableRow => match_table_row(line),
            Self::AtPhrase => match_at_phrase(line),
            Self::LinkLayer => match_link_layer(line),
        }
    }
}

/// Parses a whole table dump. Later lines overwrite earlier ones for the same address.
pub fn parse_table(text: &str) -> NeighborTable {
    let mut table = NeighborTable::new();
    let mut skipped: usize = 0;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match parse_line(line) {
            Some((addr, mac)) => {
                table.insert(addr, mac);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} neighbor table lines without a usable entry");
    }
    table
}

/// Runs the matchers in order against one line.
pub fn parse_line(line: &str) -> Option<(Ipv4Addr, MacAddr)> {
    LineFormat::ALL
        .iter()
        .find_map(|format| format.extract(line))
}

fn match_table_row(line: &str) -> Option<(Ipv4Addr, MacAddr)> {
    let mut tokens = line.split_whitespace();
    let addr_token: &str = tokens.next()?;
    let mac_token: &str = tokens.next()?;

    let addr_token: &str = addr_token
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(addr_token);

    Some((
        range::parse_addr(addr_token).ok()?,
        mac::parse_hardware_addr(mac_token)?,
    ))
}

fn match_at_phrase(line: &str) -> Option<(Ipv4Addr, MacAddr)> {
    let open: usize = line.find('(')?;
    let close: usize = open + line[open..].find(')')?;
    let addr: Ipv4Addr = range::parse_addr(&line[open + 1..close]).ok()?;

    let mut rest = line[close + 1..].split_whitespace();
    if rest.next()? != "at" {
        return None;
    }

    Some((addr, mac::parse_hardware_addr(rest.next()?)?))
}

fn match_link_layer(line: &str) -> Option<(Ipv4Addr, MacAddr)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let addr: Ipv4Addr = range::parse_addr(tokens.first()?).ok()?;

    let mac_token: &str = tokens
        .windows(2)
        .find(|pair| pair[0] == "lladdr")
        .map(|pair| pair[1])?;

    Some((addr, mac::parse_hardware_addr(mac_token)?))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! # IPv4 Address Arithmetic
//!
//! Conversion between dotted quads and their 32-bit representation, plus the
//! bounded CIDR expansion that feeds the active pass.
//!
//! Only prefixes in `/8..=/30` are accepted and the usable host count is
//! capped at [`MAX_HOSTS`], so a typo can never turn into a sweep of a
//! continent-sized block.

use std::net::Ipv4Addr;

use crate::error::DiscoveryError;

pub const MIN_PREFIX: u32 = 8;
pub const MAX_PREFIX: u32 = 30;
pub const MAX_HOSTS: u64 = 4096;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Ascending, lazy walk over the range. Each call starts from the beginning.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u64 = u32::from(self.start_addr).into();
        let end: u64 = u32::from(self.end_addr).into();
        (end + 1).saturating_sub(start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a dotted quad into its big-endian 32-bit value.
///
/// Exactly four decimal octets in `0..=255` are required. Leading zeros are
/// tolerated (`"010.0.0.1"` is `10.0.0.1`), signs and whitespace are not.
pub fn parse_ipv4(text: &str) -> Result<u32, DiscoveryError> {
    let invalid = || DiscoveryError::InvalidAddress(text.to_string());

    let octets: Vec<u32> = text
        .split('.')
        .map(|octet| parse_octet(octet).ok_or_else(invalid))
        .collect::<Result<_, _>>()?;

    let [a, b, c, d] = octets[..] else {
        return Err(invalid());
    };

    Ok((a << 24) | (b << 16) | (c << 8) | d)
}

fn parse_octet(octet: &str) -> Option<u32> {
    if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    octet.parse::<u32>().ok().filter(|value| *value <= 255)
}

/// Renders a 32-bit value as four dot-separated decimal octets.
pub fn format_ipv4(value: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (value >> 24) & 0xFF,
        (value >> 16) & 0xFF,
        (value >> 8) & 0xFF,
        value & 0xFF
    )
}

/// Convenience wrapper around [`parse_ipv4`] returning the std address type.
pub fn parse_addr(text: &str) -> Result<Ipv4Addr, DiscoveryError> {
    parse_ipv4(text).map(Ipv4Addr::from)
}

/// Expands `"<addr>/<prefix>"` into its usable hosts, network and broadcast excluded.
pub fn host_range(cidr: &str) -> Result<Ipv4Range, DiscoveryError> {
    let cidr = cidr.trim();
    let Some((addr_str, prefix_str)) = cidr.split_once('/') else {
        return Err(DiscoveryError::InvalidCidr(cidr.to_string()));
    };

    let address: u32 = parse_ipv4(addr_str)?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DiscoveryError::InvalidCidr(cidr.to_string()));
    }
    let prefix: u32 = prefix_str
        .parse()
        .map_err(|_| DiscoveryError::InvalidCidr(cidr.to_string()))?;

    if !(MIN_PREFIX..=MAX_PREFIX).contains(&prefix) {
        return Err(DiscoveryError::PrefixOutOfRange {
            prefix,
            min: MIN_PREFIX,
            max: MAX_PREFIX,
        });
    }

    let mask: u32 = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix)
    };
    let network: u32 = address & mask;
    let broadcast: u32 = network | !mask;

    // Prefix is at most /30, so the range always holds at least two hosts.
    let start: u32 = network + 1;
    let end: u32 = broadcast - 1;

    let count: u64 = u64::from(end - start) + 1;
    if count > MAX_HOSTS {
        return Err(DiscoveryError::RangeTooLarge {
            count,
            limit: MAX_HOSTS,
        });
    }

    Ok(Ipv4Range::new(Ipv4Addr::from(start), Ipv4Addr::from(end)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

use thiserror::Error;

/// Conditions that abort a discovery run before any record is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("invalid IPv4 address: '{0}'")]
    InvalidAddress(String),

    #[error("invalid CIDR block: '{0}' (expected <address>/<prefix>)")]
    InvalidCidr(String),

    #[error("refusing prefix /{prefix} (use /{min}../{max})")]
    PrefixOutOfRange { prefix: u32, min: u32, max: u32 },

    #[error("refusing to scan {count} hosts (limit is {limit}), use a smaller subnet")]
    RangeTooLarge { count: u64, limit: u64 },

    #[error("active probing requires a subnet range")]
    MissingRange,
}

//! Contracts for the collaborators the discovery engine depends on.
//!
//! None of these may fail loudly: a missing utility, a timeout or a refused
//! socket degrade to empty text, `false` or `None` at the implementation.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

/// Producer of raw neighbor/ARP table text. The format is not guaranteed.
#[async_trait]
pub trait NeighborSource: Send + Sync {
    async fn read_table(&self) -> String;
}

/// Single-address liveness test.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` only if the host answered within `timeout`.
    ///
    /// `false` is not proof that the host is absent.
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> bool;
}

/// Reverse name lookup.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    async fn lookup(&self, addr: Ipv4Addr) -> Option<String>;
}

/// Progress callback invoked with `(completed, total)`.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

//! # hostscan engine
//!
//! Discovery passes, probing and reconciliation for `hostscan`.
//!
//! * [`neighbors`]: tolerant parser for neighbor/ARP table dumps.
//! * [`scanner`] and [`network`]: bounded active probing.
//! * [`resolver`]: reverse-DNS enrichment.
//! * [`reconcile`]: pure merge rules over the record set.
//! * [`discovery`]: the [`discovery::DiscoveryService`] tying the passes together.
//! * [`system`] and [`export`]: OS and output adapters.

pub mod discovery;
pub mod export;
pub mod neighbors;
pub mod network;
pub mod reconcile;
pub mod resolver;
pub mod scanner;
pub mod system;

//! Shared models, configuration and collaborator contracts for `hostscan`.
//!
//! Everything here is free of process or socket IO so the engine in
//! `hostscan-core` can be driven by scripted collaborators in tests.

pub mod config;
pub mod error;
pub mod export;
pub mod macros;
pub mod network;
pub mod scanning;

//! Domain models for config generation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`HostSequencer`] - advance-only cursor over a network's hosts
//! - [`RoundRobin`] - cyclic cursor over recorded addresses

mod ipv4;
mod round_robin;
mod sequencer;

// Re-export public types
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, num_hosts, Ipv4, MAX_LENGTH};
pub use round_robin::RoundRobin;
pub use sequencer::HostSequencer;

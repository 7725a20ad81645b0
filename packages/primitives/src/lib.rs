//! Primitive types shared by the Roomtracker packages.
//!
//! This package contains the value types that cross package boundaries: the
//! swarm hash that keys the index, the compact peer address that doubles as
//! map key and wire encoding, swarm statistics and the announce/scrape result
//! aggregates.
pub mod core;
pub mod peer;
pub mod swarm_hash;
pub mod swarm_stats;

use std::time::Duration;

/// Duration since the Unix Epoch (timestamp).
pub type DurationSinceUnixEpoch = Duration;

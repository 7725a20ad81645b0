//! The core announce and scrape logic of the tracker.
//!
//! This package translates announce and scrape requests into operations on
//! the swarm index and assembles the data the protocol layer encodes:
//!
//! - The [`announce_handler`](crate::announce_handler) applies the announce
//!   event, selects peers for the response and computes the re-announce
//!   interval.
//! - The [`scrape_handler`](crate::scrape_handler) reads swarm statistics.
//! - The [`swarms_manager`](crate::swarms_manager) evicts peers that stopped
//!   announcing and reclaims emptied swarms.
pub mod announce_handler;
pub mod scrape_handler;
pub mod swarms_manager;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = roomtracker_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = roomtracker_clock::clock::Stopped;

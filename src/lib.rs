//! The Roomtracker application library.
//!
//! A private BitTorrent tracker where every announce and scrape is scoped to
//! a room path segment. Peers announcing the same info-hash in different
//! rooms belong to different swarms and never see each other.
//!
//! This crate only wires things together: it loads the configuration, builds
//! the service container and runs the jobs. The interesting parts live in the
//! workspace packages:
//!
//! - `roomtracker-swarm-index`: the sharded in-memory swarm index.
//! - `roomtracker-tracker-core`: announce/scrape logic and peer eviction.
//! - `roomtracker-http-protocol`: wire parsing and bencoded responses.
//! - `roomtracker-http-server`: the Axum server.
pub mod app;
pub mod bootstrap;
pub mod container;

//! Application jobs launchers.
//!
//! The main application setup has only two stages:
//!
//! 1. Wire the domain layer: the swarm index and its handlers.
//! 2. Launch the application services as concurrent jobs.
//!
//! This module contains the functions needed to start those jobs.
pub mod http_tracker;
pub mod https_redirect;
pub mod manager;
pub mod swarm_cleanup;

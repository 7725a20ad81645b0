//! The HTTP tracker server.
//!
//! It serves the two protocol endpoints, scoped by room:
//!
//! ```text
//! GET /{room}/announce
//! GET /{room}/scrape
//! ```
//!
//! and, when the tracker runs behind HTTPS, a plain-HTTP router that
//! permanently redirects to the canonical HTTPS origin.
pub mod redirect;
pub mod server;
pub mod signals;
pub mod tsl;
pub mod v1;

pub const HTTP_TRACKER_LOG_TARGET: &str = "HTTP TRACKER";

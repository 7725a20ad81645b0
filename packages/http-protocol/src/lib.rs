//! Types and functions for the Roomtracker HTTP announce and scrape protocol.
//!
//! The protocol is the classic BitTorrent HTTP tracker protocol, scoped by a
//! room path segment:
//!
//! ```text
//! GET /{room}/announce?info_hash=...&port=...
//! GET /{room}/scrape?info_hash=...
//! ```
//!
//! Requests are parsed from the raw query string because the `info_hash`
//! value percent-decodes to raw bytes, not UTF-8. Responses are bencoded and
//! always use the compact peer encoding.
pub mod percent_encoding;
pub mod v1;

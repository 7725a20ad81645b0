//! The requests the HTTP tracker accepts.
pub mod announce;
pub mod scrape;

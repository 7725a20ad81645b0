//! The responses the HTTP tracker sends, all bencoded.
pub mod announce;
pub mod error;
pub mod scrape;

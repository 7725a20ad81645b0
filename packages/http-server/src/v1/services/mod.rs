//! The services the handlers delegate to.
pub mod announce;
pub mod scrape;

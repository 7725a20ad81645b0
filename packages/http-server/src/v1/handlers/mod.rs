//! Axum handlers for the tracker endpoints.
pub mod announce;
pub mod scrape;

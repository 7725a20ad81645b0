//! The router for the HTTP tracker endpoints.
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::v1::handlers::{announce, scrape};
use crate::v1::services::announce::AnnounceService;
use crate::v1::services::scrape::ScrapeService;

/// Builds the tracker router. The room is a path segment, so every announce
/// and scrape is scoped to it.
#[must_use]
pub fn router(announce_service: Arc<AnnounceService>, scrape_service: Arc<ScrapeService>) -> Router {
    Router::new()
        .route("/{room}/announce", get(announce::handle).with_state(announce_service))
        .route("/{room}/scrape", get(scrape::handle).with_state(scrape_service))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

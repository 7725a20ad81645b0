//! Axum [`handlers`](axum#handlers) for the `scrape` requests.
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use roomtracker_http_protocol::v1::responses;

use crate::v1::extractors::scrape_request::ExtractRequest;
use crate::v1::services::scrape::ScrapeService;

/// It handles the `scrape` request for a room.
pub async fn handle(
    State(scrape_service): State<Arc<ScrapeService>>,
    Path(room): Path<String>,
    ExtractRequest(scrape_request): ExtractRequest,
) -> Response {
    tracing::debug!("http scrape request: {:#?}", scrape_request);

    let scrape_data = scrape_service.handle_scrape(&room, &scrape_request);

    let response = responses::scrape::Bencoded::from(scrape_data);

    (StatusCode::OK, response.body()).into_response()
}

//! Axum extractors for the tracker requests.
pub mod announce_request;
pub mod client_ip_sources;
pub mod scrape_request;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roomtracker_http_protocol::v1::responses;

/// A bad request response with a bencoded failure reason, the way BitTorrent
/// clients expect errors.
#[must_use]
pub fn bad_request_response(failure_reason: &str) -> Response {
    let error_response = responses::error::Error {
        failure_reason: failure_reason.to_string(),
    };

    (StatusCode::BAD_REQUEST, error_response.write()).into_response()
}

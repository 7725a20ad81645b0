//! Axum [`handlers`](axum#handlers) for the `announce` requests.
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use roomtracker_http_protocol::v1::responses;
use roomtracker_primitives::core::AnnounceData;

use crate::v1::extractors::announce_request::ExtractRequest;
use crate::v1::extractors::client_ip_sources::Extract as ExtractClientIpSources;
use crate::v1::services::announce::AnnounceService;

/// It handles the `announce` request for a room.
pub async fn handle(
    State(announce_service): State<Arc<AnnounceService>>,
    Path(room): Path<String>,
    ExtractRequest(announce_request): ExtractRequest,
    ExtractClientIpSources(client_ip_sources): ExtractClientIpSources,
) -> Response {
    tracing::debug!("http announce request: {:#?}", announce_request);

    match announce_service.handle_announce(&room, &announce_request, &client_ip_sources) {
        Ok(announce_data) => build_response(announce_data),
        Err(error) => {
            // The transport address is always available on a real connection;
            // losing it is a server misconfiguration, not a client error.
            let error_response = responses::error::Error {
                failure_reason: error.to_string(),
            };

            (StatusCode::INTERNAL_SERVER_ERROR, error_response.write()).into_response()
        }
    }
}

fn build_response(announce_data: AnnounceData) -> Response {
    let response: responses::announce::Announce = announce_data.into();

    (StatusCode::OK, response.body()).into_response()
}

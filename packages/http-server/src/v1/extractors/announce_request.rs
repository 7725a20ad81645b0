//! Axum extractor for the `announce` request.
//!
//! The request is parsed from the raw query string because the `info_hash`
//! value percent-decodes to raw bytes, which the generic query deserializer
//! rejects as invalid UTF-8.
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use roomtracker_http_protocol::v1::query::Query;
use roomtracker_http_protocol::v1::requests::announce::Announce;

use super::bad_request_response;

/// Extractor wrapper for the parsed [`Announce`] request.
pub struct ExtractRequest(pub Announce);

impl<S> FromRequestParts<S> for ExtractRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_query = parts.uri.query().unwrap_or_default();

        let announce_request =
            Announce::try_from(Query::from(raw_query)).map_err(|error| bad_request_response(&error.to_string()))?;

        Ok(ExtractRequest(announce_request))
    }
}

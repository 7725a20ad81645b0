//! Axum extractor for the `scrape` request.
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use roomtracker_http_protocol::v1::query::Query;
use roomtracker_http_protocol::v1::requests::scrape::Scrape;

use super::bad_request_response;

/// Extractor wrapper for the parsed [`Scrape`] request.
pub struct ExtractRequest(pub Scrape);

impl<S> FromRequestParts<S> for ExtractRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_query = parts.uri.query().unwrap_or_default();

        let scrape_request = Scrape::try_from(Query::from(raw_query)).map_err(|error| bad_request_response(&error.to_string()))?;

        Ok(ExtractRequest(scrape_request))
    }
}

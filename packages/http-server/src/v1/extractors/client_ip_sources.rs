//! Axum extractor for the sources of the client IP.
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use roomtracker_http_protocol::v1::services::peer_ip_resolver::ClientIpSources;

const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Extractor wrapper for the [`ClientIpSources`]: the transport peer address
/// from the connection info and the leftmost `X-Forwarded-For` value, when
/// the header is present and parseable.
pub struct Extract(pub ClientIpSources);

impl<S> FromRequestParts<S> for Extract
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let leftmost_x_forwarded_for = parts
            .headers
            .get(X_FORWARDED_FOR)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header| header.split(',').next())
            .and_then(|raw_ip| raw_ip.trim().parse::<IpAddr>().ok());

        let connection_info_socket_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(socket_address)| *socket_address);

        Ok(Extract(ClientIpSources {
            leftmost_x_forwarded_for,
            connection_info_socket_address,
        }))
    }
}

//! This service resolves the client address used as the peer identity.
//!
//! The peer IP is the transport peer address, unless the connection comes
//! through a reverse proxy the operator trusts. Given this request chain:
//!
//! ```text
//! client          <-> http proxy                  <-> server
//! ip: 126.0.0.1       ip: 127.0.0.1                   ip: 126.0.0.4
//!                     X-Forwarded-For: 126.0.0.1
//! ```
//!
//! the transport address is the proxy's, so the real client address must be
//! taken from the `X-Forwarded-For` header. That header is attacker
//! controlled, so it is only honored when the transport address is a private
//! or loopback address **and** matches the configured trusted-proxy set; then
//! the leftmost header value is used.
use std::net::{IpAddr, SocketAddr};
use std::panic::Location;
use std::str::FromStr;

use cidr::IpCidr;
use thiserror::Error;

/// The sources from which the peer IP can be obtained.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClientIpSources {
    /// The leftmost IP from the `X-Forwarded-For` HTTP header, when present
    /// and parseable.
    pub leftmost_x_forwarded_for: Option<IpAddr>,

    /// The client's socket address from the connection info.
    pub connection_info_socket_address: Option<SocketAddr>,
}

/// The set of reverse proxies whose `X-Forwarded-For` header is honored.
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies {
    cidrs: Vec<IpCidr>,
}

impl TrustedProxies {
    /// Builds the set from the configured CIDRs or plain addresses.
    ///
    /// # Errors
    ///
    /// Returns an error for an entry that is neither a CIDR nor an address.
    pub fn from_strings(raw_entries: &[String]) -> Result<Self, ParseTrustedProxyError> {
        let mut cidrs = Vec::with_capacity(raw_entries.len());

        for raw_entry in raw_entries {
            let cidr = IpCidr::from_str(raw_entry).or_else(|_| {
                IpAddr::from_str(raw_entry)
                    .map(IpCidr::new_host)
                    .map_err(|_| ParseTrustedProxyError::InvalidEntry {
                        location: Location::caller(),
                        raw_entry: raw_entry.clone(),
                    })
            })?;

            cidrs.push(cidr);
        }

        Ok(Self { cidrs })
    }

    #[must_use]
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.cidrs.iter().any(|cidr| cidr.contains(ip))
    }
}

/// Error building the trusted-proxy set from the configuration.
#[derive(Error, Debug)]
pub enum ParseTrustedProxyError {
    #[error("invalid trusted proxy entry {raw_entry} in {location}")]
    InvalidEntry {
        location: &'static Location<'static>,
        raw_entry: String,
    },
}

/// The error that can occur when resolving the peer IP.
#[derive(Error, Debug, Clone)]
pub enum PeerIpResolutionError {
    /// The connection info was not provided to the Axum framework via a route
    /// extension, so there is no transport address to fall back to.
    #[error("cannot get the client IP from the connection info in {location}")]
    MissingClientIp { location: &'static Location<'static> },
}

/// Resolves the client's real address, considering the proxy header.
///
/// # Errors
///
/// Returns an error when the transport address is unavailable.
pub fn resolve_client_ip(
    client_ip_sources: &ClientIpSources,
    trusted_proxies: &TrustedProxies,
) -> Result<IpAddr, PeerIpResolutionError> {
    let Some(socket_address) = client_ip_sources.connection_info_socket_address else {
        return Err(PeerIpResolutionError::MissingClientIp {
            location: Location::caller(),
        });
    };

    let transport_ip = socket_address.ip();

    if is_private_or_loopback(&transport_ip) && trusted_proxies.contains(&transport_ip) {
        if let Some(forwarded_ip) = client_ip_sources.leftmost_x_forwarded_for {
            return Ok(forwarded_ip);
        }
    }

    Ok(transport_ip)
}

fn is_private_or_loopback(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => ipv4.is_private() || ipv4.is_loopback(),
        // Loopback or a unique local address (fc00::/7).
        IpAddr::V6(ipv6) => ipv6.is_loopback() || (ipv6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

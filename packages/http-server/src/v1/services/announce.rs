//! The `announce` service.
//!
//! It resolves the client address, derives the swarm hash from the room and
//! the info-hash, and delegates the transition and the peer selection to the
//! core [`AnnounceHandler`].
use std::sync::Arc;

use roomtracker_http_protocol::v1::requests::announce::Announce;
use roomtracker_http_protocol::v1::services::peer_ip_resolver::{
    resolve_client_ip, ClientIpSources, PeerIpResolutionError, TrustedProxies,
};
use roomtracker_primitives::core::AnnounceData;
use roomtracker_primitives::peer::CompactPeerAddr;
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_tracker_core::announce_handler::{AnnounceHandler, PeersWanted};

/// The HTTP tracker `announce` service.
pub struct AnnounceService {
    announce_handler: Arc<AnnounceHandler>,
    trusted_proxies: TrustedProxies,
}

impl AnnounceService {
    #[must_use]
    pub fn new(announce_handler: &Arc<AnnounceHandler>, trusted_proxies: TrustedProxies) -> Self {
        Self {
            announce_handler: announce_handler.clone(),
            trusted_proxies,
        }
    }

    /// Handles an announce request inside a room.
    ///
    /// The room is taken as the raw percent-decoded path segment; together
    /// with the info-hash it determines the swarm, so clients in different
    /// rooms never see each other.
    ///
    /// # Errors
    ///
    /// This function will return an error if the client IP address cannot be
    /// resolved.
    pub fn handle_announce(
        &self,
        room: &str,
        announce_request: &Announce,
        client_ip_sources: &ClientIpSources,
    ) -> Result<AnnounceData, HttpAnnounceError> {
        let client_ip = resolve_client_ip(client_ip_sources, &self.trusted_proxies)?;

        let swarm_hash = SwarmHash::from_room_and_info_hash(room.as_bytes(), &announce_request.info_hash);

        let peer = CompactPeerAddr::new(&client_ip, announce_request.port);

        let peers_wanted = PeersWanted::from_request(announce_request.numwant);

        Ok(self.announce_handler.handle_announcement(
            &swarm_hash,
            &peer,
            announce_request.announce_event(),
            announce_request.is_seeding(),
            &peers_wanted,
        ))
    }
}

/// Errors related to announce requests.
#[derive(thiserror::Error, Debug, Clone)]
pub enum HttpAnnounceError {
    #[error("Error resolving peer IP: {source}")]
    PeerIpResolution {
        #[from]
        source: PeerIpResolutionError,
    },
}

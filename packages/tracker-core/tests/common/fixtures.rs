use std::net::{IpAddr, Ipv4Addr};

use bittorrent_primitives::info_hash::InfoHash;
use roomtracker_primitives::peer::CompactPeerAddr;
use roomtracker_primitives::swarm_hash::SwarmHash;

/// # Panics
///
/// Will panic if the string representation of the info hash is not a valid
/// info hash.
#[must_use]
pub fn sample_info_hash() -> InfoHash {
    "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0"
        .parse::<InfoHash>()
        .expect("String should be a valid info hash")
}

#[must_use]
pub fn sample_swarm_hash() -> SwarmHash {
    SwarmHash::from_room_and_info_hash(b"room", &sample_info_hash())
}

/// The client peer address.
#[must_use]
pub fn sample_peer() -> CompactPeerAddr {
    CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080)
}

/// Another peer in the same swarm.
#[must_use]
pub fn other_peer() -> CompactPeerAddr {
    CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 2)), 8080)
}

//! The bencoded `announce` response.
use roomtracker_primitives::core::AnnounceData;
use serde::Serialize;

/// The `announce` response body.
///
/// The peer lists are the compact byte strings straight from the index: the
/// IPv4 records under `peers`, the IPv6 records under `peers_ipv6`. Fields
/// are declared in bencoding dictionary order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Announce {
    pub complete: u32,
    pub incomplete: u32,
    pub interval: u32,
    #[serde(with = "serde_bytes")]
    pub peers: Vec<u8>,
    #[serde(rename = "peers_ipv6", with = "serde_bytes")]
    pub peers_ipv6: Vec<u8>,
}

impl From<AnnounceData> for Announce {
    fn from(announce_data: AnnounceData) -> Self {
        let (peers, peers_ipv6) = announce_data.peers.into_parts();

        Self {
            complete: announce_data.stats.seeders(),
            incomplete: announce_data.stats.leechers(),
            interval: announce_data.interval,
            peers,
            peers_ipv6,
        }
    }
}

impl Announce {
    /// The bencoded response body.
    ///
    /// # Panics
    ///
    /// Will panic if the response cannot be bencoded.
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        serde_bencode::to_bytes(self).expect("it should be a bencodable response")
    }
}

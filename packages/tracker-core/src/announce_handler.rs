//! The announce handler.
//!
//! It dispatches the announce event onto the swarm index, selects the peers
//! for the response and chooses the re-announce interval.
use std::sync::Arc;

use aquatic_udp_protocol::AnnounceEvent;
use roomtracker_clock::clock::Time;
use roomtracker_configuration::Core;
use roomtracker_primitives::core::AnnounceData;
use roomtracker_primitives::peer::CompactPeerAddr;
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_primitives::swarm_stats::SwarmStats;
use roomtracker_swarm_index::SwarmIndex;

use crate::CurrentClock;

/// How many peers an announce response carries when the client does not ask
/// for a specific number.
pub const DEFAULT_PEERS_WANTED: u32 = 30;

/// Swarms with fewer peers than this re-announce on a short, spread-out
/// interval so they discover each other quickly.
const SMALL_SWARM_THRESHOLD: u32 = 10;

/// Swarms with more peers than this re-announce on the long interval to shed
/// load.
const CROWDED_SWARM_THRESHOLD: u32 = 30;

/// The interval for crowded swarms, in seconds.
const CROWDED_SWARM_INTERVAL: u32 = 900;

/// Width in seconds of the spread window for small swarms. With the default
/// 60 seconds floor the interval lands in [60, 300].
const SMALL_SWARM_SPREAD: u64 = 241;

/// How many peers the client wants in the response.
///
/// Absent or non-positive values fall back to [`DEFAULT_PEERS_WANTED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeersWanted(u32);

impl PeersWanted {
    #[must_use]
    pub fn from_request(numwant: Option<u32>) -> Self {
        match numwant {
            Some(numwant) if numwant >= 1 => Self(numwant),
            _ => Self(DEFAULT_PEERS_WANTED),
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.0 as usize
    }
}

impl Default for PeersWanted {
    fn default() -> Self {
        Self(DEFAULT_PEERS_WANTED)
    }
}

/// The announce handler. One instance serves all swarms; the index it wraps
/// does its own locking.
pub struct AnnounceHandler {
    config: Core,
    swarm_index: Arc<SwarmIndex>,
}

impl AnnounceHandler {
    #[must_use]
    pub fn new(config: &Core, swarm_index: &Arc<SwarmIndex>) -> Self {
        Self {
            config: config.clone(),
            swarm_index: swarm_index.clone(),
        }
    }

    /// Handles an announcement for a swarm.
    ///
    /// A `stopped` event removes the peer, a `completed` event graduates it
    /// into the seeders, anything else inserts or refreshes it according to
    /// its seeding state. The response data carries the selected peers, the
    /// swarm totals after the transition and the interval for the next
    /// announce.
    #[must_use]
    pub fn handle_announcement(
        &self,
        swarm_hash: &SwarmHash,
        peer: &CompactPeerAddr,
        event: AnnounceEvent,
        is_seeding: bool,
        peers_wanted: &PeersWanted,
    ) -> AnnounceData {
        let now = CurrentClock::now();

        match event {
            AnnounceEvent::Stopped => self.swarm_index.remove_peer(swarm_hash, peer),
            AnnounceEvent::Completed => self.swarm_index.graduate_leecher(swarm_hash, peer, now),
            AnnounceEvent::Started | AnnounceEvent::None => {
                self.swarm_index.upsert_peer(swarm_hash, peer, is_seeding, now);
            }
        }

        let (peers, stats) = self
            .swarm_index
            .peers_for(swarm_hash, peer, is_seeding, peers_wanted.limit());

        let interval = self.announce_interval(swarm_hash, &stats);

        AnnounceData { peers, stats, interval }
    }

    /// Picks the re-announce interval for a swarm of the given size.
    ///
    /// Small swarms get a short interval spread over a window derived from
    /// the current time and the swarm hash, so concurrent clients do not
    /// synchronize. Crowded swarms get the long interval. The result always
    /// stays within the configured bounds.
    fn announce_interval(&self, swarm_hash: &SwarmHash, stats: &SwarmStats) -> u32 {
        let policy = self.config.announce_policy;

        let total_peers = stats.total();

        let interval = if total_peers < SMALL_SWARM_THRESHOLD {
            let spread = (CurrentClock::now().as_secs() + u64::from(swarm_hash.as_bytes()[0])) % SMALL_SWARM_SPREAD;

            policy.interval_min + u32::try_from(spread).expect("the spread window fits in a u32")
        } else if total_peers > CROWDED_SWARM_THRESHOLD {
            CROWDED_SWARM_INTERVAL
        } else {
            policy.interval
        };

        interval.clamp(policy.interval_min, policy.interval_max)
    }
}

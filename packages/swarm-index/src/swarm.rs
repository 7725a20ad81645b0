//! A single swarm: the peers interested in one piece of content within one
//! room.
use std::collections::HashMap;

use roomtracker_primitives::peer::{CompactPeerAddr, CompactPeerList};
use roomtracker_primitives::swarm_stats::SwarmStats;
use roomtracker_primitives::DurationSinceUnixEpoch;

/// The peers of one swarm, partitioned into seeders and leechers. Each peer
/// maps to the time it was last seen.
///
/// A peer lives in at most one of the two maps at any instant. Every mutator
/// maintains that invariant, even when a client toggles its seeding state
/// without sending a `completed` event.
#[derive(Debug, Default, Clone)]
pub struct Swarm {
    seeders: HashMap<CompactPeerAddr, DurationSinceUnixEpoch>,
    leechers: HashMap<CompactPeerAddr, DurationSinceUnixEpoch>,
}

impl Swarm {
    /// Inserts or refreshes the peer in the map matching its seeding state
    /// and removes it from the other one.
    pub fn upsert_peer(&mut self, peer: &CompactPeerAddr, seeding: bool, now: DurationSinceUnixEpoch) {
        if seeding {
            self.seeders.insert(*peer, now);
            self.leechers.remove(peer);
        } else {
            self.leechers.insert(*peer, now);
            self.seeders.remove(peer);
        }

        debug_assert!(self.peer_maps_are_disjoint());
    }

    /// Moves the peer into the seeders, refreshing its last-seen time.
    pub fn graduate_leecher(&mut self, peer: &CompactPeerAddr, now: DurationSinceUnixEpoch) {
        self.seeders.insert(*peer, now);
        self.leechers.remove(peer);

        debug_assert!(self.peer_maps_are_disjoint());
    }

    /// Removes the peer from both maps. The swarm itself stays, even when it
    /// becomes empty; the cleanup sweep reclaims it.
    pub fn remove_peer(&mut self, peer: &CompactPeerAddr) {
        self.seeders.remove(peer);
        self.leechers.remove(peer);
    }

    /// Selects up to `wanted` peers other than the requester, in compact form.
    ///
    /// A seeding requester gets no seeders (a seeder does not need other
    /// seeders). A leeching requester gets seeders first, then leechers,
    /// until `wanted` is exhausted. The order within each map is whatever the
    /// map yields.
    #[must_use]
    pub fn select_peers(&self, requester: &CompactPeerAddr, requester_is_seeding: bool, wanted: usize) -> CompactPeerList {
        let mut selection = CompactPeerList::default();

        if !requester_is_seeding {
            for peer in self.seeders.keys() {
                if selection.len() >= wanted {
                    return selection;
                }
                if peer == requester {
                    continue;
                }
                selection.push(peer);
            }
        }

        for peer in self.leechers.keys() {
            if selection.len() >= wanted {
                return selection;
            }
            if peer == requester {
                continue;
            }
            selection.push(peer);
        }

        selection
    }

    /// Current sizes of the two peer maps.
    #[must_use]
    pub fn stats(&self) -> SwarmStats {
        #[allow(clippy::cast_possible_truncation)]
        SwarmStats::new(self.seeders.len() as u32, self.leechers.len() as u32)
    }

    /// Removes the peers whose last-seen time is older than the cutoff.
    /// Returns how many were removed.
    pub fn remove_inactive_peers(&mut self, cutoff: DurationSinceUnixEpoch) -> usize {
        let before = self.len();

        self.seeders.retain(|_, last_seen| *last_seen >= cutoff);
        self.leechers.retain(|_, last_seen| *last_seen >= cutoff);

        before - self.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seeders.len() + self.leechers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seeders.is_empty() && self.leechers.is_empty()
    }

    fn peer_maps_are_disjoint(&self) -> bool {
        self.seeders.keys().all(|peer| !self.leechers.contains_key(peer))
    }
}

#[cfg(test)]
mod tests {

    mod the_swarm {
        use std::net::{IpAddr, Ipv4Addr};
        use std::time::Duration;

        use roomtracker_primitives::peer::CompactPeerAddr;
        use roomtracker_primitives::swarm_stats::SwarmStats;

        use crate::swarm::Swarm;

        fn sample_peer() -> CompactPeerAddr {
            CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080)
        }

        fn other_peer() -> CompactPeerAddr {
            CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 2)), 8080)
        }

        #[test]
        fn it_should_add_a_leecher() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);

            assert_eq!(swarm.stats(), SwarmStats::new(0, 1));
        }

        #[test]
        fn it_should_add_a_seeder() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), true, Duration::ZERO);

            assert_eq!(swarm.stats(), SwarmStats::new(1, 0));
        }

        #[test]
        fn it_should_keep_the_peer_maps_disjoint_when_a_peer_toggles_its_state() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), true, Duration::ZERO);
            swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);

            assert_eq!(swarm.stats(), SwarmStats::new(0, 1));

            swarm.upsert_peer(&sample_peer(), true, Duration::ZERO);

            assert_eq!(swarm.stats(), SwarmStats::new(1, 0));
        }

        #[test]
        fn it_should_be_idempotent_under_announce_retries() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);
            swarm.upsert_peer(&sample_peer(), false, Duration::from_secs(1));

            assert_eq!(swarm.stats(), SwarmStats::new(0, 1));
        }

        #[test]
        fn it_should_graduate_a_leecher_into_a_seeder() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);
            swarm.graduate_leecher(&sample_peer(), Duration::from_secs(1));

            assert_eq!(swarm.stats(), SwarmStats::new(1, 0));
        }

        #[test]
        fn it_should_remove_a_peer_regardless_of_its_role() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), true, Duration::ZERO);
            swarm.upsert_peer(&other_peer(), false, Duration::ZERO);

            swarm.remove_peer(&sample_peer());
            swarm.remove_peer(&other_peer());

            assert!(swarm.is_empty());
        }

        #[test]
        fn it_should_refresh_the_last_seen_time_on_every_announce() {
            let mut swarm = Swarm::default();

            swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);
            swarm.upsert_peer(&sample_peer(), false, Duration::from_secs(10));

            // A cutoff after the first announce but before the refresh must
            // not evict the peer.
            assert_eq!(swarm.remove_inactive_peers(Duration::from_secs(5)), 0);
            assert_eq!(swarm.stats(), SwarmStats::new(0, 1));
        }

        mod selecting_peers {
            use std::net::{IpAddr, Ipv4Addr};
            use std::time::Duration;

            use roomtracker_primitives::peer::CompactPeerAddr;

            use crate::swarm::tests::the_swarm::{other_peer, sample_peer};
            use crate::swarm::Swarm;

            #[test]
            fn it_should_never_return_the_requester_itself() {
                let mut swarm = Swarm::default();

                swarm.upsert_peer(&sample_peer(), false, Duration::ZERO);

                let selection = swarm.select_peers(&sample_peer(), false, 30);

                assert!(selection.is_empty());
            }

            #[test]
            fn it_should_not_return_seeders_to_a_seeding_requester() {
                let mut swarm = Swarm::default();

                swarm.upsert_peer(&other_peer(), true, Duration::ZERO);

                let selection = swarm.select_peers(&sample_peer(), true, 30);

                assert!(selection.is_empty());
            }

            #[test]
            fn it_should_return_seeders_to_a_leeching_requester() {
                let mut swarm = Swarm::default();

                swarm.upsert_peer(&other_peer(), true, Duration::ZERO);

                let selection = swarm.select_peers(&sample_peer(), false, 30);

                assert_eq!(selection.len(), 1);
            }

            #[test]
            fn it_should_return_at_most_the_wanted_number_of_peers() {
                let mut swarm = Swarm::default();

                for last_octet in 1..=50u8 {
                    let peer = CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, last_octet)), 8080);
                    swarm.upsert_peer(&peer, false, Duration::ZERO);
                }

                let requester = CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 1, 1)), 8080);

                let selection = swarm.select_peers(&requester, false, 30);

                assert_eq!(selection.len(), 30);
            }
        }
    }
}

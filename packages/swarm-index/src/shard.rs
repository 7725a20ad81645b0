//! One independently locked slice of the swarm index.
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use roomtracker_primitives::peer::{CompactPeerAddr, CompactPeerList};
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_primitives::swarm_stats::SwarmStats;
use roomtracker_primitives::DurationSinceUnixEpoch;

use crate::swarm::Swarm;

/// The swarms whose hash falls into this shard, behind a single
/// readers-writer lock. The lock protects the map and every [`Swarm`] inside
/// it; nested structures are not separately locked.
#[derive(Debug, Default)]
pub struct Shard {
    swarms: RwLock<HashMap<SwarmHash, Swarm>>,
}

impl Shard {
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SwarmHash, Swarm>> {
        self.swarms.read().expect("it should get the read lock")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SwarmHash, Swarm>> {
        self.swarms.write().expect("it should get the write lock")
    }

    /// Inserts or refreshes a peer, creating the swarm lazily.
    pub fn upsert_peer(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr, seeding: bool, now: DurationSinceUnixEpoch) {
        let mut swarms = self.write();

        swarms.entry(*swarm_hash).or_default().upsert_peer(peer, seeding, now);
    }

    /// Moves a peer into the seeders, creating the swarm lazily.
    pub fn graduate_leecher(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr, now: DurationSinceUnixEpoch) {
        let mut swarms = self.write();

        swarms.entry(*swarm_hash).or_default().graduate_leecher(peer, now);
    }

    /// Removes a peer from the swarm. A missing swarm is a no-op. An emptied
    /// swarm is not dropped here; the cleanup sweep reclaims it.
    pub fn remove_peer(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr) {
        let mut swarms = self.write();

        if let Some(swarm) = swarms.get_mut(swarm_hash) {
            swarm.remove_peer(peer);
        }
    }

    /// Selects peers for the requester and reads the swarm totals in one
    /// consistent snapshot. A missing swarm yields empty buffers and zeroed
    /// stats.
    #[must_use]
    pub fn peers_for(
        &self,
        swarm_hash: &SwarmHash,
        requester: &CompactPeerAddr,
        requester_is_seeding: bool,
        wanted: usize,
    ) -> (CompactPeerList, SwarmStats) {
        let swarms = self.read();

        match swarms.get(swarm_hash) {
            Some(swarm) => (swarm.select_peers(requester, requester_is_seeding, wanted), swarm.stats()),
            None => (CompactPeerList::default(), SwarmStats::zeroed()),
        }
    }

    /// Reads the swarm totals, or zeroed stats when the swarm is absent.
    #[must_use]
    pub fn swarm_stats(&self, swarm_hash: &SwarmHash) -> SwarmStats {
        let swarms = self.read();

        swarms.get(swarm_hash).map_or_else(SwarmStats::zeroed, Swarm::stats)
    }

    /// Evicts the peers last seen before the cutoff and drops the swarms that
    /// end up empty. Holds this shard's write lock for the whole sweep, and
    /// no other lock.
    pub fn purge_expired(&self, cutoff: DurationSinceUnixEpoch) -> (usize, usize) {
        let mut swarms = self.write();

        let mut peers_removed = 0;
        for swarm in swarms.values_mut() {
            peers_removed += swarm.remove_inactive_peers(cutoff);
        }

        let swarms_before = swarms.len();
        swarms.retain(|_, swarm| !swarm.is_empty());

        (peers_removed, swarms_before - swarms.len())
    }

    #[must_use]
    pub fn contains(&self, swarm_hash: &SwarmHash) -> bool {
        self.read().contains_key(swarm_hash)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

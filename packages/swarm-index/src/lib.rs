//! In-memory index of swarms and their peers.
//!
//! The index is a fixed array of [`SHARD_COUNT`] shards, each holding the
//! swarms whose hash falls into it behind its own readers-writer lock. SHA-1
//! output is uniform, so keying the shard on the first byte of the swarm hash
//! spreads swarms evenly and bounds contention to a small fraction of the
//! traffic, with an O(1) shard lookup.
//!
//! Every operation touches exactly one shard and never acquires two shard
//! locks, so no lock ordering protocol is needed. Mutators and the cleanup
//! sweep take the shard exclusively; reads take it shared. Within one swarm,
//! operations are linearizable; across swarms nothing is ordered.
//!
//! The index is purely ephemeral: swarms are created lazily by the first
//! announce that references them and reclaimed by the cleanup sweep once
//! their last peer expires or leaves.
pub mod shard;
pub mod swarm;

use roomtracker_primitives::peer::{CompactPeerAddr, CompactPeerList};
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_primitives::swarm_stats::SwarmStats;
use roomtracker_primitives::DurationSinceUnixEpoch;

use crate::shard::Shard;

/// Number of shards. With 256 shards the first byte of the swarm hash is the
/// shard index.
pub const SHARD_COUNT: usize = 256;

/// The sharded index. See the crate docs for the locking model.
#[derive(Debug)]
pub struct SwarmIndex {
    shards: Vec<Shard>,
}

impl Default for SwarmIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SwarmIndex {
    /// Creates an empty index. The shard array is fixed for the lifetime of
    /// the index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Shard::default()).collect(),
        }
    }

    fn shard(&self, swarm_hash: &SwarmHash) -> &Shard {
        &self.shards[swarm_hash.as_bytes()[0] as usize]
    }

    /// Inserts or refreshes a peer in the swarm, creating the swarm when it
    /// does not exist yet. A seeding peer lands in the seeders, a leeching
    /// peer in the leechers; the peer is dropped from the other map so a
    /// state toggle without a `completed` event cannot duplicate it.
    /// Idempotent under retry.
    pub fn upsert_peer(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr, seeding: bool, now: DurationSinceUnixEpoch) {
        self.shard(swarm_hash).upsert_peer(swarm_hash, peer, seeding, now);
    }

    /// Moves a peer into the seeders of the swarm, creating the swarm when it
    /// does not exist yet. This is the `completed` announce event; it is kept
    /// apart from [`Self::upsert_peer`] so completion handling can evolve
    /// independently.
    pub fn graduate_leecher(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr, now: DurationSinceUnixEpoch) {
        self.shard(swarm_hash).graduate_leecher(swarm_hash, peer, now);
    }

    /// Removes a peer from the swarm, whatever its role. Removing from an
    /// unknown swarm is a no-op. Idempotent.
    pub fn remove_peer(&self, swarm_hash: &SwarmHash, peer: &CompactPeerAddr) {
        self.shard(swarm_hash).remove_peer(swarm_hash, peer);
    }

    /// Selects up to `wanted` peers of the swarm other than the requester,
    /// already in compact wire form and partitioned by address family,
    /// together with the swarm totals before selection. An unknown swarm
    /// yields empty buffers and zeroed totals; this never errors.
    #[must_use]
    pub fn peers_for(
        &self,
        swarm_hash: &SwarmHash,
        requester: &CompactPeerAddr,
        requester_is_seeding: bool,
        wanted: usize,
    ) -> (CompactPeerList, SwarmStats) {
        self.shard(swarm_hash).peers_for(swarm_hash, requester, requester_is_seeding, wanted)
    }

    /// Reads the swarm totals, or zeroed stats when the swarm is absent.
    #[must_use]
    pub fn swarm_stats(&self, swarm_hash: &SwarmHash) -> SwarmStats {
        self.shard(swarm_hash).swarm_stats(swarm_hash)
    }

    /// Evicts every peer last seen before the cutoff and drops the swarms
    /// that become empty. Shards are swept one at a time; the sweep never
    /// holds more than one shard lock, so request latency stays bounded.
    pub fn purge_expired(&self, cutoff: DurationSinceUnixEpoch) -> CleanupTally {
        let mut tally = CleanupTally::default();

        for shard in &self.shards {
            let (peers_removed, swarms_removed) = shard.purge_expired(cutoff);

            tally.peers_removed += peers_removed;
            tally.swarms_removed += swarms_removed;
        }

        tally
    }

    /// Whether the swarm currently has an entry, empty or not.
    #[must_use]
    pub fn contains(&self, swarm_hash: &SwarmHash) -> bool {
        self.shard(swarm_hash).contains(swarm_hash)
    }

    /// Number of swarms currently indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(Shard::is_empty)
    }
}

/// Totals of one cleanup sweep over the whole index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupTally {
    pub peers_removed: usize,
    pub swarms_removed: usize,
}

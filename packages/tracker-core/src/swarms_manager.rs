//! Eviction of stale peers and reclamation of empty swarms.
use std::sync::Arc;
use std::time::Duration;

use roomtracker_clock::clock::Time;
use roomtracker_clock::conv::convert_from_timestamp_to_datetime_utc;
use roomtracker_configuration::Core;
use roomtracker_swarm_index::SwarmIndex;

use crate::CurrentClock;

/// It sweeps the swarm index, evicting the peers that have not announced
/// within the configured timeout and dropping the swarms that end up empty.
///
/// The cleanup job calls it once per tick; it can also be called directly.
pub struct SwarmsManager {
    config: Core,
    swarm_index: Arc<SwarmIndex>,
}

impl SwarmsManager {
    #[must_use]
    pub fn new(config: &Core, swarm_index: &Arc<SwarmIndex>) -> Self {
        Self {
            config: config.clone(),
            swarm_index: swarm_index.clone(),
        }
    }

    /// Runs one cleanup sweep over the whole index.
    pub fn cleanup_swarms(&self) {
        let timeout = Duration::from_secs(self.config.max_peer_timeout);

        let cutoff = CurrentClock::now_sub(&timeout).unwrap_or_default();

        tracing::info!(
            "Removing peers inactive since: {} ...",
            convert_from_timestamp_to_datetime_utc(cutoff)
        );

        let tally = self.swarm_index.purge_expired(cutoff);

        tracing::info!(
            peers_removed = tally.peers_removed,
            swarms_removed = tally.swarms_removed,
            swarms_remaining = self.swarm_index.len()
        );
    }
}

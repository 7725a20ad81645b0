//! Swarm cleanup job starter.
use std::sync::Arc;
use std::time::Duration;

use roomtracker_tracker_core::swarms_manager::SwarmsManager;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Starts the periodic job that evicts peers that stopped announcing and
/// reclaims emptied swarms.
///
/// The period must exceed the maximum announce interval, or live clients
/// would be evicted between two announces.
#[must_use]
pub fn start_job(
    interval_secs: u64,
    swarms_manager: &Arc<SwarmsManager>,
    cancellation_token: CancellationToken,
) -> JoinHandle<()> {
    let swarms_manager = swarms_manager.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

        // The first tick fires immediately; skip it, there is nothing to
        // sweep on a fresh index.
        interval.tick().await;

        loop {
            tokio::select! {
                () = cancellation_token.cancelled() => {
                    tracing::info!("Stopping the swarm cleanup job ...");
                    break;
                }
                _ = interval.tick() => {
                    swarms_manager.cleanup_swarms();
                }
            }
        }
    })
}

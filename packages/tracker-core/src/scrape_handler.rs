//! The scrape handler.
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use roomtracker_primitives::core::ScrapeData;
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_swarm_index::SwarmIndex;

/// The scrape handler. It reads the swarm statistics without announcing.
pub struct ScrapeHandler {
    swarm_index: Arc<SwarmIndex>,
}

impl ScrapeHandler {
    #[must_use]
    pub fn new(swarm_index: &Arc<SwarmIndex>) -> Self {
        Self {
            swarm_index: swarm_index.clone(),
        }
    }

    /// Reads the seeder and leecher counts for the swarm. An unknown swarm
    /// yields zeroed stats; scraping never errors.
    #[must_use]
    pub fn handle_scrape(&self, swarm_hash: &SwarmHash, info_hash: &InfoHash) -> ScrapeData {
        ScrapeData {
            info_hash: *info_hash,
            stats: self.swarm_index.swarm_stats(swarm_hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use bittorrent_primitives::info_hash::InfoHash;
    use roomtracker_primitives::peer::CompactPeerAddr;
    use roomtracker_primitives::swarm_hash::SwarmHash;
    use roomtracker_primitives::swarm_stats::SwarmStats;
    use roomtracker_swarm_index::SwarmIndex;

    use crate::scrape_handler::ScrapeHandler;

    fn sample_info_hash() -> InfoHash {
        "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0"
            .parse::<InfoHash>()
            .expect("String should be a valid info hash")
    }

    #[test]
    fn it_should_return_zeroed_stats_for_an_unknown_swarm() {
        let swarm_index = Arc::new(SwarmIndex::new());
        let scrape_handler = ScrapeHandler::new(&swarm_index);

        let swarm_hash = SwarmHash::from_room_and_info_hash(b"room", &sample_info_hash());

        let scrape_data = scrape_handler.handle_scrape(&swarm_hash, &sample_info_hash());

        assert_eq!(scrape_data.stats, SwarmStats::zeroed());
        assert_eq!(scrape_data.info_hash, sample_info_hash());
    }

    #[test]
    fn it_should_return_the_current_swarm_totals() {
        let swarm_index = Arc::new(SwarmIndex::new());
        let scrape_handler = ScrapeHandler::new(&swarm_index);

        let swarm_hash = SwarmHash::from_room_and_info_hash(b"room", &sample_info_hash());

        let seeder = CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080);
        let leecher = CompactPeerAddr::new(&IpAddr::V4(Ipv4Addr::new(126, 0, 0, 2)), 8080);

        swarm_index.upsert_peer(&swarm_hash, &seeder, true, Duration::ZERO);
        swarm_index.upsert_peer(&swarm_hash, &leecher, false, Duration::ZERO);

        let scrape_data = scrape_handler.handle_scrape(&swarm_hash, &sample_info_hash());

        assert_eq!(scrape_data.stats, SwarmStats::new(1, 1));
    }
}

//! The `scrape` service.
use std::sync::Arc;

use roomtracker_http_protocol::v1::requests::scrape::Scrape;
use roomtracker_primitives::core::ScrapeData;
use roomtracker_primitives::swarm_hash::SwarmHash;
use roomtracker_tracker_core::scrape_handler::ScrapeHandler;

/// The HTTP tracker `scrape` service.
pub struct ScrapeService {
    scrape_handler: Arc<ScrapeHandler>,
}

impl ScrapeService {
    #[must_use]
    pub fn new(scrape_handler: &Arc<ScrapeHandler>) -> Self {
        Self {
            scrape_handler: scrape_handler.clone(),
        }
    }

    /// Handles a scrape request inside a room. Scraping never fails: an
    /// unknown swarm reports zeroed stats.
    #[must_use]
    pub fn handle_scrape(&self, room: &str, scrape_request: &Scrape) -> ScrapeData {
        let swarm_hash = SwarmHash::from_room_and_info_hash(room.as_bytes(), &scrape_request.info_hash);

        self.scrape_handler.handle_scrape(&swarm_hash, &scrape_request.info_hash)
    }
}

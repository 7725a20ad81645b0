//! The application container: the wired services shared by the jobs.
use std::sync::Arc;

use roomtracker_configuration::Configuration;
use roomtracker_http_protocol::v1::services::peer_ip_resolver::{ParseTrustedProxyError, TrustedProxies};
use roomtracker_http_server::v1::services::announce::AnnounceService;
use roomtracker_http_server::v1::services::scrape::ScrapeService;
use roomtracker_swarm_index::SwarmIndex;
use roomtracker_tracker_core::announce_handler::AnnounceHandler;
use roomtracker_tracker_core::scrape_handler::ScrapeHandler;
use roomtracker_tracker_core::swarms_manager::SwarmsManager;

pub struct AppContainer {
    pub configuration: Arc<Configuration>,
    pub swarm_index: Arc<SwarmIndex>,
    pub announce_handler: Arc<AnnounceHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
    pub swarms_manager: Arc<SwarmsManager>,
    pub announce_service: Arc<AnnounceService>,
    pub scrape_service: Arc<ScrapeService>,
}

impl AppContainer {
    /// Wires the whole application from the configuration.
    ///
    /// The swarm index is created here, once, before any request is served;
    /// everything else borrows it through an [`Arc`].
    ///
    /// # Errors
    ///
    /// Will return an error if a configured trusted proxy cannot be parsed.
    pub fn initialize(configuration: &Configuration) -> Result<AppContainer, ParseTrustedProxyError> {
        let trusted_proxies = TrustedProxies::from_strings(&configuration.core.net.trusted_proxies)?;

        let swarm_index = Arc::new(SwarmIndex::new());

        let announce_handler = Arc::new(AnnounceHandler::new(&configuration.core, &swarm_index));
        let scrape_handler = Arc::new(ScrapeHandler::new(&swarm_index));
        let swarms_manager = Arc::new(SwarmsManager::new(&configuration.core, &swarm_index));

        let announce_service = Arc::new(AnnounceService::new(&announce_handler, trusted_proxies));
        let scrape_service = Arc::new(ScrapeService::new(&scrape_handler));

        Ok(AppContainer {
            configuration: Arc::new(configuration.clone()),
            swarm_index,
            announce_handler,
            scrape_handler,
            swarms_manager,
            announce_service,
            scrape_service,
        })
    }
}

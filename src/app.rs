//! Roomtracker application.
//!
//! The application is a container for a handful of concurrent jobs built on
//! top of the shared swarm index:
//!
//! - The HTTP tracker instance (HTTPS when domains are configured).
//! - The HTTP to HTTPS redirect, only when the tracker serves HTTPS.
//! - The swarm cleanup, which evicts peers that stopped announcing.
use std::sync::Arc;

use roomtracker_configuration::Configuration;

use crate::bootstrap;
use crate::bootstrap::jobs::manager::JobManager;
use crate::bootstrap::jobs::{http_tracker, https_redirect, swarm_cleanup};
use crate::container::AppContainer;

pub async fn run() -> (Arc<AppContainer>, JobManager) {
    let (config, app_container) = bootstrap::app::setup();

    let app_container = Arc::new(app_container);

    let jobs = start(&config, &app_container).await;

    (app_container, jobs)
}

/// Starts the application jobs.
pub async fn start(config: &Configuration, app_container: &Arc<AppContainer>) -> JobManager {
    let mut job_manager = JobManager::new();

    start_the_http_tracker(app_container, &mut job_manager).await;

    start_the_https_redirect(config, &mut job_manager).await;

    start_swarm_cleanup(config, app_container, &mut job_manager);

    job_manager
}

async fn start_the_http_tracker(app_container: &Arc<AppContainer>, job_manager: &mut JobManager) {
    let handle = http_tracker::start_job(app_container, job_manager.new_cancellation_token()).await;

    job_manager.push("http_tracker", handle);
}

async fn start_the_https_redirect(config: &Configuration, job_manager: &mut JobManager) {
    if serves_https(config) {
        let handle = https_redirect::start_job(&config.core.net, job_manager.new_cancellation_token()).await;

        job_manager.push("https_redirect", handle);
    }
}

fn start_swarm_cleanup(config: &Configuration, app_container: &Arc<AppContainer>, job_manager: &mut JobManager) {
    if config.core.inactive_peer_cleanup_interval > 0 {
        let handle = swarm_cleanup::start_job(
            config.core.inactive_peer_cleanup_interval,
            &app_container.swarms_manager,
            job_manager.new_cancellation_token(),
        );

        job_manager.push("swarm_cleanup", handle);
    } else {
        tracing::warn!("Swarm cleanup is disabled; stale peers will never be evicted");
    }
}

/// The tracker serves HTTPS when it has domains and a TLS config.
fn serves_https(config: &Configuration) -> bool {
    !config.core.net.domains.is_empty() && config.core.net.tsl_config.is_some()
}

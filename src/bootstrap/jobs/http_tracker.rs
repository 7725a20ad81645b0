//! HTTP tracker instance job starter.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use roomtracker_http_server::server::{HttpServer, Launcher};
use roomtracker_http_server::tsl::make_rust_tls;
use roomtracker_http_server::v1::routes::router;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::container::AppContainer;

const HTTPS_PORT: u16 = 443;

/// Starts the HTTP tracker instance and returns the handle of the task that
/// stops it when the cancellation token fires.
///
/// With domains and a TLS config present the instance serves HTTPS on 443;
/// otherwise it serves plain HTTP on the configured port.
///
/// # Panics
///
/// Will panic if the TLS files cannot be loaded or the server cannot bind.
pub async fn start_job(app_container: &Arc<AppContainer>, cancellation_token: CancellationToken) -> JoinHandle<()> {
    let net = &app_container.configuration.core.net;

    let tls = if net.domains.is_empty() {
        None
    } else {
        match make_rust_tls(net.tsl_config.as_ref()).await {
            Some(tls) => Some(tls.expect("it should load the TLS config")),
            None => {
                tracing::warn!("Domains are configured but there is no TLS config; serving plain HTTP");
                None
            }
        }
    };

    let port = if tls.is_some() { HTTPS_PORT } else { net.port };
    let bind_to = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);

    let app = router(
        app_container.announce_service.clone(),
        app_container.scrape_service.clone(),
    );

    let server = HttpServer::new(Launcher::new(bind_to, tls));

    let running_server = server.start(app).await.expect("it should start the HTTP tracker server");

    tokio::spawn(async move {
        cancellation_token.cancelled().await;

        if let Err(error) = running_server.stop().await {
            tracing::warn!("Error stopping the HTTP tracker server: {error:?}");
        }
    })
}

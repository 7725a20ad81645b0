//! HTTP to HTTPS redirect job starter.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use roomtracker_configuration::Network;
use roomtracker_http_server::redirect;
use roomtracker_http_server::server::{HttpServer, Launcher};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const HTTP_PORT: u16 = 80;

/// Starts the plain-HTTP server that permanently redirects everything to the
/// HTTPS origin, and returns the handle of the task that stops it when the
/// cancellation token fires.
///
/// # Panics
///
/// Will panic if the server cannot bind to port 80.
pub async fn start_job(net: &Network, cancellation_token: CancellationToken) -> JoinHandle<()> {
    let app = redirect::router(net.domain.clone());

    let bind_to = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), HTTP_PORT);

    let server = HttpServer::new(Launcher::new(bind_to, None));

    let running_server = server.start(app).await.expect("it should start the HTTPS redirect server");

    tokio::spawn(async move {
        cancellation_token.cancelled().await;

        if let Err(error) = running_server.stop().await {
            tracing::warn!("Error stopping the HTTPS redirect server: {error:?}");
        }
    })
}

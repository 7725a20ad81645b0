//! Signals to coordinate the server lifecycle.
use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::oneshot::Receiver;
use tokio::time::{sleep, Instant};

/// Message sent to a running server to make it halt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Halted {
    Normal,
}

/// Message sent back by a launched server once it is bound.
#[derive(Debug)]
pub struct Started {
    /// The address the server is actually bound to, with the concrete port
    /// when the configuration asked for port zero.
    pub address: SocketAddr,
}

/// Resolves when the halt channel fires. A dropped sender counts as a halt
/// request, so an aborted controller still shuts the server down.
pub async fn shutdown_signal_with_message(rx_halt: Receiver<Halted>, message: String) {
    let _halt = rx_halt.await;

    tracing::info!("{message}");
}

/// Waits for the halt signal, then drains the server connections within a
/// grace period before forcing the shutdown.
pub async fn graceful_shutdown(handle: axum_server::Handle, rx_halt: Receiver<Halted>, message: String, address: SocketAddr) {
    shutdown_signal_with_message(rx_halt, message.clone()).await;

    let grace_period = Duration::from_secs(90);
    let max_wait = Duration::from_secs(95);
    let start = Instant::now();

    handle.graceful_shutdown(Some(grace_period));

    tracing::info!("!! {} in {} seconds !!", message, grace_period.as_secs());

    loop {
        if handle.connection_count() == 0 {
            tracing::info!("All connections closed, shutting down server on address {}", address);
            break;
        }

        if start.elapsed() >= max_wait {
            tracing::warn!(
                "Shutdown timeout of {} seconds reached. Forcing shutdown on address {} with {} active connections.",
                max_wait.as_secs(),
                address,
                handle.connection_count()
            );
            break;
        }

        sleep(Duration::from_secs(1)).await;
    }
}

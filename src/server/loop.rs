// Server loop module
// Accepts connections until a stop signal, then drains open connections

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::Instant;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the open connection count
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Accept connections until `shutdown` is notified.
///
/// After the signal the listener is closed at once, idle keep-alive
/// connections are told to close, and the loop waits up to
/// `shutdown.grace_period` seconds for in-flight connections to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &graceful);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    // Resolves once every watched connection is gone; the drain below bounds the wait
    tokio::spawn(graceful.shutdown());

    let grace_period = state.config.shutdown.grace_period;
    logger::log_shutdown_started(
        grace_period,
        state.active_connections.load(Ordering::SeqCst),
    );
    let remaining = drain_connections(&state, Duration::from_secs(grace_period)).await;
    logger::log_shutdown_finished(remaining);
}

/// Wait until no connection is open or `grace_period` has elapsed.
///
/// Returns the number of connections still open. A grace period too large
/// to represent as a deadline waits without limit.
async fn drain_connections(state: &AppState, grace_period: Duration) -> usize {
    let deadline = Instant::now().checked_add(grace_period);
    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 || deadline.is_some_and(|d| Instant::now() >= d) {
            return active;
        }
        let wait = deadline.map_or(DRAIN_POLL_INTERVAL, |d| {
            DRAIN_POLL_INTERVAL.min(d.saturating_duration_since(Instant::now()))
        });
        tokio::time::sleep(wait).await;
    }
}

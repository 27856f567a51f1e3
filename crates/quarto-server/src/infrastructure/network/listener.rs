//! TCP acceptor: bind, accept, and spawn one handler task per connection.
//!
//! # Scalability
//!
//! Each connection runs in its own Tokio task.  The accept loop never waits on
//! a handler: it accepts a connection, spawns a task for it, and goes straight
//! back to accepting.  There is no connection limit and no pooling; handlers
//! share nothing mutable, only the read-only engine and configuration.
//!
//! # Shutdown
//!
//! `accept()` is wrapped in a short timeout so the loop can notice when the
//! shared `running` flag is cleared (see `main.rs`).  Handler tasks live in a
//! `JoinSet`; once the loop stops, [`serve`] waits for them to finish, bounded
//! by the read deadline plus the write deadline.  Handlers still running after
//! that are aborted.
//!
//! # Accept errors
//!
//! A failed `accept()` (for example `EMFILE`) is logged and followed by a
//! short pause, so a persistent failure does not spin the loop.

use std::io;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};
use tracing::{error, info, trace, warn};

use crate::application::EvaluateMoveUseCase;
use crate::domain::ServerConfig;
use crate::infrastructure::network::connection::serve_connection;

/// How long a single `accept()` may block before the shutdown flag is checked.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Pause after a failed `accept()` before trying again.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves connections until `running` is cleared.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission, address not local).  Errors on individual connections are
/// logged and never returned.
pub async fn run_server(
    config: ServerConfig,
    use_case: EvaluateMoveUseCase,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind move server on {}", config.bind_addr))?;

    serve(listener, config, use_case, running).await
}

/// Runs the accept loop on an already-bound listener.
///
/// Split from [`run_server`] so tests can bind port 0 and learn the chosen
/// port before serving.
///
/// # Errors
///
/// Returns an error only if the listener's local address cannot be read.
pub async fn serve(
    listener: TcpListener,
    config: ServerConfig,
    use_case: EvaluateMoveUseCase,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let local_addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!("move server listening on {local_addr}");

    let config = Arc::new(config);
    let mut handlers = JoinSet::new();

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // Reap finished handlers so the set does not grow without bound.
        while handlers.try_join_next().is_some() {}

        match timeout(ACCEPT_POLL_INTERVAL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                trace!("accepted connection from {peer_addr}");
                let use_case = use_case.clone();
                let config = Arc::clone(&config);
                handlers.spawn(serve_connection(stream, peer_addr, use_case, config));
            }
            Ok(Err(e)) => back_off_after_accept_error(&e).await,
            Err(_) => {
                // No connection within the poll interval.
            }
        }
    }

    drop(listener);
    drain_handlers(&mut handlers, config.read_timeout + config.write_timeout).await;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Logs a failed `accept()` and pauses before the next attempt.
async fn back_off_after_accept_error(e: &io::Error) {
    // Transient (e.g. too many open files); keep accepting after a pause.
    error!("accept error: {e}; retrying in {ACCEPT_ERROR_BACKOFF:?}");
    sleep(ACCEPT_ERROR_BACKOFF).await;
}

/// Waits up to `grace` for every in-flight handler to finish.
async fn drain_handlers(handlers: &mut JoinSet<()>, grace: Duration) {
    if handlers.is_empty() {
        return;
    }
    info!(in_flight = handlers.len(), "waiting for in-flight connections");
    let drain = async { while handlers.join_next().await.is_some() {} };
    if timeout(grace, drain).await.is_err() {
        warn!(
            remaining = handlers.len(),
            "in-flight connections did not finish within {grace:?}; aborting"
        );
        handlers.abort_all();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

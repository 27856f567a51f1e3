//! Per-connection handler: one request in, at most one response out.
//!
//! # Lifecycle
//!
//! ```text
//! Accepted ─► Reading ─┬─► TimedOut ─────────────────────────► Closed
//!                      ├─► ReadError ────────────────────────► Closed
//!                      └─► Decoded ─┬─► Invalid ─────────────► Closed
//!                                   └─► Evaluated ─► Responded ─► Closed
//! ```
//!
//! A single read deadline is armed when the handler starts and covers the whole
//! 33-byte read, however many partial reads it takes.  Only the `Responded`
//! path writes bytes.  Every other path ends with the socket closed and
//! nothing written, which is how the protocol signals a rejection.
//!
//! [`handle_connection`] is generic over `AsyncRead + AsyncWrite`, so the unit
//! tests below drive it with `tokio_test` mock streams instead of sockets.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quarto_core::{encode_response, EngineError, Request, Response, REQUEST_FRAME_SIZE};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::application::{EvaluateMoveUseCase, Verdict};
use crate::domain::ServerConfig;

/// Reasons a connection ended without a response being written.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Fewer than 33 bytes arrived before the read deadline.
    #[error("read deadline of {0:?} elapsed before a full request arrived")]
    ReadTimeout(Duration),

    /// The peer closed early or the socket failed during the read.
    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),

    /// The response could not be written before the write deadline.
    #[error("write deadline of {0:?} elapsed")]
    WriteTimeout(Duration),

    /// The socket failed while writing the response.
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),

    /// The engine could not play the requested piece on this snapshot.
    #[error("engine could not evaluate the request: {0}")]
    Engine(#[from] EngineError),
}

/// How a connection that completed without error ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was written and the write side shut down.
    Responded(Response),
    /// The piece index was unavailable; nothing was written.
    Rejected,
}

/// Runs one request/response exchange on `stream`.
///
/// The caller is responsible for dropping the stream afterwards, which closes
/// it on every path including errors.
///
/// # Errors
///
/// Returns [`ConnectionError`] when the read or write fails or times out, or
/// when the engine rejects the snapshot.  None of these paths write bytes.
pub async fn handle_connection<S>(
    stream: &mut S,
    use_case: &EvaluateMoveUseCase,
    config: &ServerConfig,
) -> Result<Outcome, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let frame = read_frame(stream, config.read_timeout).await?;
    let request = Request::from_frame(&frame);

    match use_case.execute(&request)? {
        Verdict::Reject => {
            // Best effort: the stream is dropped right after either way.
            let _ = stream.shutdown().await;
            Ok(Outcome::Rejected)
        }
        Verdict::Respond(response) => {
            write_response(stream, &response, config.write_timeout).await?;
            Ok(Outcome::Responded(response))
        }
    }
}

/// Task entry point for one accepted socket.
///
/// Wraps [`handle_connection`] and logs the outcome.  The socket is dropped,
/// and therefore closed, when this function returns.
#[instrument(name = "connection", skip_all, fields(peer = %peer_addr))]
pub async fn serve_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    use_case: EvaluateMoveUseCase,
    config: Arc<ServerConfig>,
) {
    match handle_connection(&mut stream, &use_case, &config).await {
        Ok(Outcome::Responded(response)) => {
            debug!(tag = ?response.tag(), "response written");
        }
        Ok(Outcome::Rejected) => {
            debug!("piece index unavailable; closed without response");
        }
        Err(ConnectionError::ReadTimeout(deadline)) => {
            warn!(?deadline, "read timed out; closed without response");
        }
        Err(e) => {
            warn!("connection closed with error: {e}");
        }
    }
}

// ── Framing ───────────────────────────────────────────────────────────────────

/// Reads exactly one request frame under a single deadline.
async fn read_frame<S>(
    stream: &mut S,
    deadline: Duration,
) -> Result<[u8; REQUEST_FRAME_SIZE], ConnectionError>
where
    S: AsyncRead + Unpin,
{
    let mut frame = [0u8; REQUEST_FRAME_SIZE];
    match timeout(deadline, stream.read_exact(&mut frame)).await {
        Ok(Ok(_)) => Ok(frame),
        Ok(Err(e)) => Err(ConnectionError::Read(e)),
        Err(_) => Err(ConnectionError::ReadTimeout(deadline)),
    }
}

/// Writes the encoded response and shuts down the write side.
async fn write_response<S>(
    stream: &mut S,
    response: &Response,
    deadline: Duration,
) -> Result<(), ConnectionError>
where
    S: AsyncWrite + Unpin,
{
    let bytes = encode_response(response);
    let write = async {
        stream.write_all(&bytes).await?;
        stream.shutdown().await
    };
    match timeout(deadline, write).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ConnectionError::Write(e)),
        Err(_) => Err(ConnectionError::WriteTimeout(deadline)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Quarto move server: entry point.
//!
//! Listens on TCP and answers one move request per connection.  A client
//! sends the whole game (board, stash, and the piece it must place) as a
//! 33-byte frame; the server replies with a 1- or 4-byte frame and closes.
//!
//! # Usage
//!
//! ```text
//! quarto-server [OPTIONS]
//!
//! Options:
//!   --config        <PATH>   Optional TOML configuration file
//!   --bind          <ADDR>   IP address to bind [default: 0.0.0.0]
//!   --port          <PORT>   TCP port [default: 1234]
//!   --read-timeout  <SECS>   Deadline for the 33-byte request [default: 10]
//!   --write-timeout <SECS>   Deadline for the response [default: 10]
//!   --log-level     <LEVEL>  tracing filter when RUST_LOG is unset [default: info]
//! ```
//!
//! # Precedence
//!
//! Each setting is taken from the first source that provides it:
//! command-line flag, then environment variable, then the `--config` file,
//! then the built-in default.
//!
//! | Variable               | Flag              |
//! |------------------------|-------------------|
//! | `QUARTO_CONFIG`        | `--config`        |
//! | `QUARTO_BIND`          | `--bind`          |
//! | `QUARTO_PORT`          | `--port`          |
//! | `QUARTO_READ_TIMEOUT`  | `--read-timeout`  |
//! | `QUARTO_WRITE_TIMEOUT` | `--write-timeout` |
//! | `QUARTO_LOG_LEVEL`     | `--log-level`     |
//!
//! `RUST_LOG`, when set, overrides the log level from every other source.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quarto_core::QuartoEngine;
use quarto_server::application::EvaluateMoveUseCase;
use quarto_server::domain::ServerConfig;
use quarto_server::infrastructure::network::run_server;
use quarto_server::infrastructure::storage::config::{load_config, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Stateless Quarto move server.
///
/// Every option is optional so that an unset flag can fall through to the
/// environment, then to the config file, then to the default.
#[derive(Debug, Parser)]
#[command(
    name = "quarto-server",
    about = "Stateless TCP server that evaluates a single Quarto move per connection",
    version
)]
struct Cli {
    /// Path to a TOML configuration file.  A named file that does not exist is
    /// an error.
    #[arg(long, env = "QUARTO_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind.  `0.0.0.0` accepts connections on every interface.
    #[arg(long, env = "QUARTO_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "QUARTO_PORT")]
    port: Option<u16>,

    /// Seconds allowed for the complete request to arrive.
    #[arg(long, env = "QUARTO_READ_TIMEOUT")]
    read_timeout: Option<u64>,

    /// Seconds allowed for writing the response.
    #[arg(long, env = "QUARTO_WRITE_TIMEOUT")]
    write_timeout: Option<u64>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[arg(long, env = "QUARTO_LOG_LEVEL")]
    log_level: Option<String>,
}

/// Fully resolved startup settings.
#[derive(Debug)]
struct Settings {
    server: ServerConfig,
    log_level: String,
}

impl Cli {
    /// Loads the config file named by `--config`, or defaults if none.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file cannot be read or parsed.
    fn load_file(&self) -> anyhow::Result<AppConfig> {
        match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config file {}", path.display())),
            None => Ok(AppConfig::default()),
        }
    }

    /// Merges the parsed arguments over `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting bind address is not a valid IP
    /// address.
    fn resolve(self, file: AppConfig) -> anyhow::Result<Settings> {
        let bind = self.bind.unwrap_or(file.server.bind_address);
        let ip: IpAddr = bind
            .parse()
            .with_context(|| format!("invalid bind address: '{bind}'"))?;
        let port = self.port.unwrap_or(file.server.port);
        let read_secs = self.read_timeout.unwrap_or(file.server.read_timeout_secs);
        let write_secs = self.write_timeout.unwrap_or(file.server.write_timeout_secs);

        Ok(Settings {
            server: ServerConfig {
                bind_addr: SocketAddr::new(ip, port),
                read_timeout: Duration::from_secs(read_secs),
                write_timeout: Duration::from_secs(write_secs),
            },
            log_level: self.log_level.unwrap_or(file.logging.level),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed and merged with the optional config file.
/// 2. `tracing_subscriber` is initialised.  `RUST_LOG` wins; otherwise the
///    resolved log level is used.
/// 3. A Ctrl+C handler is spawned that clears a shared `AtomicBool`.
/// 4. [`run_server`] binds the port and serves until the flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = cli.load_file()?;
    let settings = cli.resolve(file)?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!(
        "Quarto move server starting: bind={}, read_timeout={:?}, write_timeout={:?}",
        settings.server.bind_addr, settings.server.read_timeout, settings.server.write_timeout
    );

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; stopping accept loop");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Main server loop ──────────────────────────────────────────────────────
    let use_case = EvaluateMoveUseCase::new(Arc::new(QuartoEngine::new()));
    run_server(settings.server, use_case, running).await?;

    info!("Quarto move server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! `main.rs` builds it from CLI arguments, environment variables, and the
//! optional TOML file; tests build it directly.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default TCP port the server listens on.
pub const DEFAULT_PORT: u16 = 1234;

/// Default deadline for reading the complete 33-byte request.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for writing the response.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// All runtime configuration for the move server.
///
/// Built once at startup and then wrapped in an `Arc` so every connection task
/// can read the deadlines without copying.
///
/// # Example
///
/// ```rust
/// use quarto_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 1234);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address and port of the listening socket.  `0.0.0.0` accepts
    /// connections on every interface.
    pub bind_addr: SocketAddr,

    /// Absolute deadline, armed when the connection is accepted, for reading
    /// all 33 request bytes.
    pub read_timeout: Duration,

    /// Deadline for writing the response frame.
    pub write_timeout: Duration,
}

impl Default for ServerConfig {
    /// | Field         | Default        |
    /// |---------------|----------------|
    /// | bind_addr     | `0.0.0.0:1234` |
    /// | read_timeout  | 10 seconds     |
    /// | write_timeout | 10 seconds     |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_1234() {
        // Arrange / Act
        let cfg = ServerConfig::default();
        // Assert
        assert_eq!(cfg.bind_addr.port(), 1234);
    }

    #[test]
    fn test_default_binds_all_interfaces() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.ip().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_default_timeouts_are_10s() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.read_timeout, Duration::from_secs(10));
        assert_eq!(cfg.write_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_custom_values() {
        let cfg = ServerConfig {
            bind_addr: "127.0.0.1:9000".parse().unwrap(),
            read_timeout: Duration::from_millis(250),
            write_timeout: Duration::from_secs(1),
        };
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.read_timeout, Duration::from_millis(250));
        assert_ne!(cfg, ServerConfig::default());
    }
}

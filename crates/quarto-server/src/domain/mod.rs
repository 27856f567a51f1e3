//! Domain layer for quarto-server.
//!
//! The game rules themselves live in `quarto_core`.  The only server-specific
//! domain type is the runtime configuration, which carries no I/O and can be
//! built by hand in tests.

pub mod config;

pub use config::ServerConfig;

//! Infrastructure layer for the move server.
//!
//! Contains the adapters that touch the outside world: TCP sockets and the
//! optional TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `quarto_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod network;
pub mod storage;

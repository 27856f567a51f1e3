//! Storage infrastructure: the optional configuration file.
//!
//! The `config` sub-module reads a TOML file into [`config::AppConfig`].  The
//! server never writes configuration back; the file is operator-owned.

pub mod config;

//! Network infrastructure for the move server.
//!
//! # Sub-modules
//!
//! - **`listener`** – Binds the TCP socket and spawns one task per accepted
//!   connection.  Polls a shared flag so Ctrl+C stops the accept loop.
//!
//! - **`connection`** – Owns one accepted socket: reads exactly 33 bytes
//!   under a deadline, hands the decoded request to the application layer,
//!   and writes the 1- or 4-byte response (or nothing, on a reject).

pub mod connection;
pub mod listener;

pub use connection::{handle_connection, ConnectionError, Outcome};
pub use listener::{run_server, serve};
